//! Metrics Collectors
//!
//! This module contains specialized collectors for the two Nature Remo API endpoints.
//! Each collector is responsible for querying one endpoint and updating the corresponding
//! Prometheus metrics.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` containing shared state
//! - Query the Nature Remo API
//! - Update Prometheus metrics using helper methods
//! - Return `CollectionResult` (`Success` or `Failed`)
//!
//! # Error Handling
//!
//! Individual collector failures are non-fatal - they log warnings and return
//! `CollectionStatus::Failed`. This ensures partial metrics are still exposed even if one
//! endpoint is unavailable.

use crate::config::MetricsConfig;
use crate::metrics::MetricsCollector;
use crate::natureremo::NatureRemoClient;
use tracing::{info, warn};

/// Shared context passed to all collectors
#[derive(Clone, Copy)]
pub struct CollectionContext<'a> {
    /// Nature Remo API client
    pub client: &'a NatureRemoClient,
    /// Metrics collector for updating Prometheus metrics
    pub metrics: &'a MetricsCollector,
    /// Metrics configuration (feature flags, intervals, etc.)
    pub config: &'a MetricsConfig,
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
}

/// Result type for collector functions
///
/// - `Ok(CollectionStatus::Success)` = Collection succeeded
/// - `Ok(CollectionStatus::Failed)` = Collection failed but non-fatal (logged as warning)
/// - `Err(_)` = Fatal error (should propagate)
pub type CollectionResult = Result<CollectionStatus, anyhow::Error>;

/// Helper to reduce boilerplate in collectors
///
/// Wraps API queries with consistent error handling:
/// - On success: processes data, logs success, returns `CollectionStatus::Success`
/// - On error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Examples
///
/// ```no_run
/// # use natureremo_exporter::collectors::*;
/// async fn example(ctx: &CollectionContext<'_>) -> CollectionResult {
///     collect_with_handler(
///         "devices",
///         ctx.client.get_devices(),
///         |devices| {
///             for device in devices {
///                 // Update metrics...
///             }
///         },
///     ).await
/// }
/// ```
pub async fn collect_with_handler<T, F, P, E>(
    name: &str,
    query_future: F,
    process: P,
) -> CollectionResult
where
    F: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: FnOnce(T),
{
    match query_future.await {
        Ok(data) => {
            process(data);
            info!("Updated {} metrics", name);
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            Ok(CollectionStatus::Failed)
        }
    }
}

pub mod device;
pub mod echonet;

pub use device::collect_device_metrics;
pub use echonet::{collect_echonet_metrics, decode_appliance, record_appliances};
