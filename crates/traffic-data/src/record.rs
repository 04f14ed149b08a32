//! Record Types
//!
//! One record type per dataset plus an enum spanning all three.
//! Wire field names stay camelCase for compatibility with the legacy
//! service's clients.

use serde::{Deserialize, Serialize};

/// Traffic flow measurement at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficRecord {
    /// Average speed (km/h)
    pub traffic_speed: u32,
    /// Vehicles counted per measurement interval
    pub traffic_volume: u32,
    /// Street name, matched exactly
    pub location: String,
}

/// Reported accident at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentRecord {
    /// Severity on a 1-5 scale
    pub accident_severity: u8,
    /// Street name, matched exactly
    pub location: String,
}

/// Surface state of a road segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadCondition {
    Clear,
    Construction,
    Icy,
    Flooded,
}

/// Road surface report at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadConditionRecord {
    /// Current surface state
    pub road_condition: RoadCondition,
    /// Street name, matched exactly
    pub location: String,
}

/// One record from any of the three datasets.
///
/// Rules pattern match on the variant, so a predicate written for one
/// record kind falls through for every other kind instead of probing
/// fields at runtime. Serializes as the inner record's fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoadRecord {
    Traffic(TrafficRecord),
    Accident(AccidentRecord),
    RoadCondition(RoadConditionRecord),
}

impl RoadRecord {
    /// Location string of the underlying record
    pub fn location(&self) -> &str {
        match self {
            RoadRecord::Traffic(r) => &r.location,
            RoadRecord::Accident(r) => &r.location,
            RoadRecord::RoadCondition(r) => &r.location,
        }
    }
}
