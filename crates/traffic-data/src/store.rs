//! In-Memory Data Store

use crate::record::{AccidentRecord, RoadCondition, RoadConditionRecord, RoadRecord, TrafficRecord};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors while loading fixture data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse fixture data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// JSON fixture document holding the three collections
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureDoc {
    #[serde(default)]
    traffic: Vec<TrafficRecord>,
    #[serde(default)]
    accidents: Vec<AccidentRecord>,
    #[serde(default)]
    road_conditions: Vec<RoadConditionRecord>,
}

/// Read-only store holding the three sample datasets.
///
/// Constructed once at startup and never mutated afterwards; requests only
/// read, so no locking is needed around it.
pub struct DataStore {
    traffic: Vec<TrafficRecord>,
    accidents: Vec<AccidentRecord>,
    road_conditions: Vec<RoadConditionRecord>,
}

impl DataStore {
    /// Create a store from explicit collections
    pub fn new(
        traffic: Vec<TrafficRecord>,
        accidents: Vec<AccidentRecord>,
        road_conditions: Vec<RoadConditionRecord>,
    ) -> Self {
        info!(
            "Data store ready: {} traffic, {} accident, {} road condition records",
            traffic.len(),
            accidents.len(),
            road_conditions.len()
        );
        Self {
            traffic,
            accidents,
            road_conditions,
        }
    }

    /// Builtin sample dataset carried over from the legacy service
    pub fn sample() -> Self {
        let traffic = vec![
            traffic_record(15, 120, "Main St"),
            traffic_record(35, 80, "2nd Ave"),
            traffic_record(10, 150, "3rd Blvd"),
            traffic_record(25, 90, "4th St"),
            traffic_record(20, 110, "5th Ave"),
            traffic_record(30, 70, "6th Rd"),
        ];
        let accidents = vec![
            accident_record(3, "Main St"),
            accident_record(1, "2nd Ave"),
            accident_record(4, "4th St"),
            accident_record(2, "5th Ave"),
            accident_record(3, "6th Rd"),
        ];
        let road_conditions = vec![
            condition_record(RoadCondition::Construction, "Main St"),
            condition_record(RoadCondition::Clear, "2nd Ave"),
            condition_record(RoadCondition::Construction, "5th Ave"),
            condition_record(RoadCondition::Clear, "6th Rd"),
        ];

        Self::new(traffic, accidents, road_conditions)
    }

    /// Load fixture data from a JSON document string
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let doc: FixtureDoc = serde_json::from_str(json)?;
        Ok(Self::new(doc.traffic, doc.accidents, doc.road_conditions))
    }

    /// Load fixture data from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// All records at `location`, matched exactly and case-sensitively.
    ///
    /// Traffic records come first, then accidents, then road conditions,
    /// keeping dataset order within each group. Unknown locations yield an
    /// empty vector.
    pub fn records_at(&self, location: &str) -> Vec<RoadRecord> {
        let mut records = Vec::new();
        records.extend(
            self.traffic
                .iter()
                .filter(|r| r.location == location)
                .cloned()
                .map(RoadRecord::Traffic),
        );
        records.extend(
            self.accidents
                .iter()
                .filter(|r| r.location == location)
                .cloned()
                .map(RoadRecord::Accident),
        );
        records.extend(
            self.road_conditions
                .iter()
                .filter(|r| r.location == location)
                .cloned()
                .map(RoadRecord::RoadCondition),
        );
        records
    }

    /// Number of traffic records
    pub fn traffic_count(&self) -> usize {
        self.traffic.len()
    }

    /// Number of accident records
    pub fn accident_count(&self) -> usize {
        self.accidents.len()
    }

    /// Number of road condition records
    pub fn road_condition_count(&self) -> usize {
        self.road_conditions.len()
    }
}

fn traffic_record(speed: u32, volume: u32, location: &str) -> TrafficRecord {
    TrafficRecord {
        traffic_speed: speed,
        traffic_volume: volume,
        location: location.to_string(),
    }
}

fn accident_record(severity: u8, location: &str) -> AccidentRecord {
    AccidentRecord {
        accident_severity: severity,
        location: location.to_string(),
    }
}

fn condition_record(condition: RoadCondition, location: &str) -> RoadConditionRecord {
    RoadConditionRecord {
        road_condition: condition,
        location: location.to_string(),
    }
}
