//! Service Metrics
//!
//! Prometheus counters exported at `/metrics`. The recorder is installed
//! once per process; later installs (repeated state construction in tests)
//! fall back to rendering nothing rather than aborting.

use crate::AppState;
use axum::extract::State;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tracing::warn;

/// Total recommendation lookups served
pub const REQUESTS_TOTAL: &str = "advisor_requests_total";
/// Total recommendation entries returned across all lookups
pub const RECOMMENDATIONS_TOTAL: &str = "advisor_recommendations_total";

/// Install the global Prometheus recorder and keep a render handle
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics recorder already installed, /metrics will be empty: {}", e);
            None
        }
    }
}

/// GET /metrics - Prometheus exposition text
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}
