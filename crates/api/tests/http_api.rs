//! End-to-end tests over a real socket.
//!
//! These bind the router to an ephemeral port and talk to it with a plain
//! HTTP client, the way a browser dashboard would:
//! - percent-encoded location segments decode before lookup
//! - quiet and unknown locations answer 200 with an empty array
//! - cross-origin reads are allowed
//!
//! Run: cargo test -p api --test http_api

use api::{create_router, AppState};
use recommendation::Advisor;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(Arc::new(AppState::new(Advisor::default())));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_recommendations_over_http() {
    let addr = spawn_server().await;

    let response = reqwest::get(format!("http://{}/recommendations/Main%20St", addr))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let entries: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["result"], "High congestion detected");
    assert_eq!(entries[0]["trafficSpeed"], 15);
    assert_eq!(entries[0]["trafficVolume"], 120);
    assert_eq!(entries[0]["location"], "Main St");
}

#[tokio::test]
async fn test_quiet_location_over_http() {
    let addr = spawn_server().await;

    // 2nd Ave has a record in every dataset but triggers no rule.
    let response = reqwest::get(format!("http://{}/recommendations/2nd%20Ave", addr))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let entries: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_cors_allows_cross_origin_reads() {
    let addr = spawn_server().await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/recommendations/Main%20St", addr))
        .header("Origin", "http://dashboard.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_health_over_http() {
    let addr = spawn_server().await;

    let response = reqwest::get(format!("http://{}/api/v1/health", addr))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["rule_count"], 3);
}
