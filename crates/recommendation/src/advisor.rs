//! Advisor Implementation

use rule_engine::{Recommendation, RuleSet};
use traffic_data::DataStore;
use tracing::{debug, info};

/// Aggregates recommendations for a location across all three datasets.
///
/// Owns the read-only store and rule set; both are injected at
/// construction so real data sources can replace the samples without
/// touching rule logic.
pub struct Advisor {
    store: DataStore,
    rules: RuleSet,
}

impl Advisor {
    /// Create an advisor over a store and rule set
    pub fn new(store: DataStore, rules: RuleSet) -> Self {
        info!("Advisor ready with {} rules", rules.len());
        Self { store, rules }
    }

    /// All recommendations triggered at `location`.
    ///
    /// Records are evaluated sequentially in store order (traffic, then
    /// accidents, then road conditions); records matching no rule are
    /// skipped. Unknown locations yield an empty vector, never an error.
    pub fn recommendations_for(&self, location: &str) -> Vec<Recommendation> {
        let records = self.store.records_at(location);
        debug!("{} records at '{}'", records.len(), location);

        let recommendations: Vec<Recommendation> = records
            .into_iter()
            .filter_map(|record| self.rules.evaluate(record))
            .collect();

        info!(
            "{} recommendations for location '{}'",
            recommendations.len(),
            location
        );
        recommendations
    }

    /// The underlying data store
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// The rule set in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(DataStore::sample(), RuleSet::builtin())
    }
}
