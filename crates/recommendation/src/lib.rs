//! Recommendation Aggregation
//!
//! Combines the data store and the rule engine: filters records by
//! location and collects every triggered recommendation in order.

mod advisor;

pub use advisor::Advisor;
