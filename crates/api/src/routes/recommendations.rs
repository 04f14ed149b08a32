//! Recommendation Routes

use axum::{
    extract::{Path, State},
    Json,
};
use metrics::counter;
use std::sync::Arc;
use tracing::info;

use crate::telemetry::{RECOMMENDATIONS_TOTAL, REQUESTS_TOTAL};
use crate::AppState;
use rule_engine::Recommendation;

/// Get recommendations for a location
///
/// The path segment is percent-decoded by the extractor, so
/// `/recommendations/Main%20St` looks up "Main St". Locations with no
/// matching records (or no triggered rules) answer with an empty array.
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> Json<Vec<Recommendation>> {
    info!("Fetching recommendations for location: {}", location);
    counter!(REQUESTS_TOTAL).increment(1);

    let recommendations = state.advisor.recommendations_for(&location);
    counter!(RECOMMENDATIONS_TOTAL).increment(recommendations.len() as u64);

    Json(recommendations)
}
