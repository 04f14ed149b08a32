//! Rule Definitions and Evaluation

use serde::Serialize;
use tracing::debug;
use traffic_data::{RoadCondition, RoadRecord};

/// A single if-then rule: a predicate over one record and the
/// recommendation it produces on match.
///
/// Predicates are pure functions of the record's fields. A predicate
/// written for one record kind returns false for every other kind; it
/// never errors.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Predicate deciding whether the rule fires
    pub applies: fn(&RoadRecord) -> bool,
    /// Result label attached on match
    pub result: &'static str,
    /// Recommended action attached on match
    pub action: &'static str,
}

/// Recommendation produced when a rule matches a record.
///
/// Serializes as the originating record's fields plus `result` and
/// `action`, byte-compatible with the legacy service's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// The record that triggered the rule, flattened into the output
    #[serde(flatten)]
    pub record: RoadRecord,
    /// Result label of the matched rule
    pub result: &'static str,
    /// Recommended action of the matched rule
    pub action: &'static str,
}

/// Ordered rule collection evaluated first-match-wins.
///
/// Evaluation never mutates the set; the same record always yields the
/// same outcome.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set; declaration order is evaluation order
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The three builtin traffic rules, in evaluation order:
    /// congestion, severe accident, road construction.
    pub fn builtin() -> Self {
        Self::new(vec![
            Rule {
                name: "high-congestion",
                applies: high_congestion,
                result: "High congestion detected",
                action: "Optimize traffic signals",
            },
            Rule {
                name: "severe-accident",
                applies: severe_accident,
                result: "Severe accident reported",
                action: "Recommend alternative routes",
            },
            Rule {
                name: "road-construction",
                applies: road_construction,
                result: "Road construction detected",
                action: "Suggest infrastructure improvements",
            },
        ])
    }

    /// First rule matching `record`, in declaration order
    pub fn first_match(&self, record: &RoadRecord) -> Option<&Rule> {
        self.rules.iter().find(|rule| (rule.applies)(record))
    }

    /// Evaluate one record, producing a recommendation when a rule fires.
    ///
    /// Later rules are not consulted once one matches. Records matching no
    /// rule yield `None` and are excluded from any response.
    pub fn evaluate(&self, record: RoadRecord) -> Option<Recommendation> {
        let rule = self.first_match(&record)?;
        debug!("Rule '{}' matched record at {}", rule.name, record.location());
        Some(Recommendation {
            record,
            result: rule.result,
            action: rule.action,
        })
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Slow, dense traffic: speed below 20 km/h and volume above 100
fn high_congestion(record: &RoadRecord) -> bool {
    matches!(
        record,
        RoadRecord::Traffic(t) if t.traffic_speed < 20 && t.traffic_volume > 100
    )
}

/// Accident with severity above 2 on the 1-5 scale
fn severe_accident(record: &RoadRecord) -> bool {
    matches!(
        record,
        RoadRecord::Accident(a) if a.accident_severity > 2
    )
}

/// Road segment currently under construction
fn road_construction(record: &RoadRecord) -> bool {
    matches!(
        record,
        RoadRecord::RoadCondition(c) if c.road_condition == RoadCondition::Construction
    )
}
