//! HTTP Server and Metrics Collection
//!
//! This module implements the Prometheus exporter HTTP server and the metric collection loop.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, `/hello` and `/`
//! - **Collection Loop**: Background task that periodically queries the Nature Remo API and
//!   updates metrics
//! - **State Management**: Shared state (config, metrics, client) using Arc for thread-safety
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (200 if the last collection succeeded, 503 otherwise)
//! - `GET /hello` - Liveness probe, always `hello`
//!
//! # Metrics Collection
//!
//! The collection loop runs every N seconds (configured via `scrape_interval_seconds`) and:
//! 1. Queries the enabled Nature Remo API endpoints
//! 2. Decodes Echonet Lite registers into fresh per-appliance register sets
//! 3. Sets `natureremo_up` to 1 if any query succeeds, 0 if all fail

use crate::collectors::{self, CollectionContext, CollectionStatus};
use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::natureremo::NatureRemoClient;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

#[derive(Clone)]
struct CollectionState {
    config: Config,
    metrics: MetricsCollector,
    client: Arc<NatureRemoClient>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let client = Arc::new(NatureRemoClient::new(&config.natureremo)?);

    let state = CollectionState {
        config: config.clone(),
        metrics: metrics.clone(),
        client,
    };

    // Start background metrics collection
    tokio::spawn(async move {
        collect_metrics_loop(state).await;
    });

    let app = build_router(metrics);

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Router serving the exporter endpoints from `metrics`
pub fn build_router(metrics: MetricsCollector) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/hello", get(hello_handler))
        .with_state(metrics)
}

async fn collect_metrics_loop(state: CollectionState) {
    let mut ticker = interval(Duration::from_secs(
        state.config.metrics.scrape_interval_seconds,
    ));

    loop {
        ticker.tick().await;

        if let Err(e) = collect_metrics(&state).await {
            error!("Failed to collect metrics: {}", e);
            state.metrics.up.set(0.0);
        } else {
            state.metrics.up.set(1.0);
        }
    }
}

async fn collect_metrics(state: &CollectionState) -> anyhow::Result<()> {
    info!("Collecting metrics from Nature Remo");

    let ctx = CollectionContext {
        client: &state.client,
        metrics: &state.metrics,
        config: &state.config.metrics,
    };

    let mut any_success = false;

    macro_rules! collect {
        ($collector:expr) => {
            match $collector.await? {
                CollectionStatus::Success => any_success = true,
                CollectionStatus::Failed => { /* Already logged */ }
            }
        };
    }

    if ctx.config.collect_device_events {
        collect!(collectors::collect_device_metrics(&ctx));
    }

    if ctx.config.collect_echonet_lite {
        collect!(collectors::collect_echonet_metrics(&ctx));
    }

    if !any_success {
        anyhow::bail!("Failed to collect any metrics from Nature Remo - check the access token");
    }

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>Nature Remo Exporter</title></head>
<body>
<h1>Nature Remo Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(metrics): State<MetricsCollector>) -> Response {
    match metrics.render() {
        Ok(body) => body.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(metrics): State<MetricsCollector>) -> impl IntoResponse {
    if metrics.up.get() > 0.0 {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Nature Remo API unreachable")
    }
}

async fn hello_handler() -> &'static str {
    "hello"
}
