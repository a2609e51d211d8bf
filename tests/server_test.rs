//! Server integration tests
//!
//! Tests for HTTP endpoints and metrics rendering.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use natureremo_exporter::metrics::MetricsCollector;
use natureremo_exporter::server::build_router;
use tower::ServiceExt;

/// Helper to create a test metrics instance
fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

async fn get(metrics: &MetricsCollector, uri: &str) -> (StatusCode, String) {
    let response = build_router(metrics.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    // Given: A metrics collector with some metrics set
    let metrics = create_test_metrics();
    metrics.up.set(1.0);
    metrics
        .echonet_lite
        .with_label_values(&["Remo E", "instantaneous_power"])
        .set(272.0);

    // When: Requesting /metrics
    let (status, body) = get(&metrics, "/metrics").await;

    // Then: Output should be valid Prometheus format
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# HELP"), "Missing HELP comment");
    assert!(body.contains("# TYPE"), "Missing TYPE comment");
    assert!(body.contains("natureremo_up 1"), "Missing up metric");
    assert!(
        body.contains("{device_name=\"Remo E\",type=\"instantaneous_power\"} 272"),
        "Labels not in correct format"
    );
}

#[tokio::test]
async fn test_health_reflects_up_gauge() {
    let metrics = create_test_metrics();

    // Before any successful collection
    let (status, _) = get(&metrics, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    metrics.up.set(1.0);
    let (status, body) = get(&metrics, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_hello_endpoint() {
    let (status, body) = get(&create_test_metrics(), "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn test_root_links_to_metrics() {
    let (status, body) = get(&create_test_metrics(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/metrics\""));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = get(&create_test_metrics(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_metrics_rendering_is_stable() {
    let metrics = create_test_metrics();
    metrics.up.set(1.0);

    let render1 = metrics.render().expect("First render failed");
    let render2 = metrics.render().expect("Second render failed");

    assert_eq!(render1, render2, "Metrics rendering is not stable");
}
