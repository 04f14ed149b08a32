//! Traffic Datasets
//!
//! Record types for the three sample datasets (traffic, accidents, road
//! conditions) and the read-only in-memory store the advisor reads from.

mod record;
mod store;

pub use record::{AccidentRecord, RoadCondition, RoadConditionRecord, RoadRecord, TrafficRecord};
pub use store::{DataError, DataStore};
