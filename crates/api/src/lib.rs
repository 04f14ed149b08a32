//! Traffic Advisor API Server
//!
//! REST server exposing rule-based traffic recommendations by location.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use recommendation::Advisor;
use rule_engine::RuleSet;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use traffic_data::DataStore;

mod config;
mod error;
mod rate_limit;
mod routes;
mod telemetry;

pub use self::config::ServerConfig;
pub use rate_limit::RateLimitConfig;

/// Application state shared across handlers.
///
/// The data store and rule set are read-only after startup, so state is
/// shared as a plain `Arc` with no lock around it.
pub struct AppState {
    /// Recommendation aggregator
    pub advisor: Advisor,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus render handle (None when a recorder was already installed)
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create application state over an advisor
    pub fn new(advisor: Advisor) -> Self {
        Self {
            advisor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: telemetry::install_recorder(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub datasets: DatasetCounts,
    pub rule_count: usize,
}

/// Sizes of the three in-memory datasets
#[derive(Debug, Serialize)]
pub struct DatasetCounts {
    pub traffic: usize,
    pub accidents: usize,
    pub road_conditions: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/recommendations/:location",
            get(routes::recommendations::get_recommendations),
        )
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(telemetry::metrics_handler))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let store = state.advisor.store();
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        datasets: DatasetCounts {
            traffic: store.traffic_count(),
            accidents: store.accident_count(),
            road_conditions: store.road_condition_count(),
        },
        rule_count: state.advisor.rules().len(),
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Build the advisor from configuration: fixture file when given,
/// builtin sample data otherwise.
pub fn build_advisor(config: &ServerConfig) -> anyhow::Result<Advisor> {
    let store = match &config.data_path {
        Some(path) => {
            info!("Loading fixture data from {}", path.display());
            DataStore::from_json_file(path)?
        }
        None => DataStore::sample(),
    };
    Ok(Advisor::new(store, RuleSet::builtin()))
}

/// Run the server until the process is stopped
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let advisor = build_advisor(&config)?;
    let state = Arc::new(AppState::new(advisor));

    let governor = rate_limit::create_governor_config(&RateLimitConfig::default());
    let app = create_router(state).layer(tower_governor::GovernorLayer { config: governor });

    let addr = config.addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        create_router(Arc::new(AppState::new(Advisor::default())))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_recommendations_for_main_st() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/recommendations/Main%20St")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["result"], "High congestion detected");
        assert_eq!(entries[1]["action"], "Recommend alternative routes");
        assert_eq!(entries[2]["roadCondition"], "construction");
    }

    #[tokio::test]
    async fn test_unknown_location_returns_empty_array() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/recommendations/Elm%20St")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_quiet_location_returns_empty_array() {
        let app = test_router();

        // 2nd Ave has records in every dataset, none of which match a rule.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/recommendations/2nd%20Ave")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_panic_maps_to_generic_500() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(error::handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_health_reports_dataset_sizes() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["datasets"]["traffic"], 6);
        assert_eq!(json["datasets"]["accidents"], 5);
        assert_eq!(json["datasets"]["road_conditions"], 4);
        assert_eq!(json["rule_count"], 3);
    }

    #[tokio::test]
    async fn test_metrics_route_responds() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
