//! Echonet Lite Smart-Meter Metrics Collector
//!
//! Decodes the raw register values of every Echonet Lite appliance into power readings.
//!
//! # Metrics Produced
//! - `natureremo_echonet_lite` - Derived reading
//!   - Labels: device_name, type (cumulative_power, instantaneous_power)
//! - `natureremo_echonet_lite_timestamp_seconds` - When the source property was reported
//!   - Labels: device_name, type
//! - `natureremo_echonet_lite_errors_total` - Readings that could not be decoded
//!   - Labels: device_name, reason
//!
//! # Isolation
//!
//! Each appliance gets its own fresh [`RegisterSet`]. A property that fails to decode
//! drops that appliance for the cycle; a failed calculation drops only that reading.
//! Other appliances are always processed.
//!
//! Gauges are cleared before every query, so a failed request leaves no readings from the
//! previous cycle behind.

use super::{collect_with_handler, CollectionContext, CollectionResult, CollectionStatus};
use crate::echonet::{PowerKind, Reading, RegisterSet};
use crate::error::EchonetError;
use crate::metrics::MetricsCollector;
use crate::natureremo::types::Appliance;
use tracing::{debug, warn};

/// Decode one appliance into its two readings.
///
/// The outer error means a property could not be stored; inner errors belong to a single
/// reading.
pub fn decode_appliance(
    appliance: &Appliance,
) -> Result<Vec<(PowerKind, Result<Reading, EchonetError>)>, EchonetError> {
    let registers = RegisterSet::from_properties(
        appliance
            .properties
            .iter()
            .map(|p| (p.epc.as_str(), p.val.as_str(), p.updated_at)),
    )?;

    Ok(PowerKind::ALL
        .into_iter()
        .map(|kind| (kind, registers.reading(kind)))
        .collect())
}

/// Write the readings of every appliance into `metrics`
pub fn record_appliances(metrics: &MetricsCollector, appliances: &[Appliance]) {
    metrics.reset_echonet();

    for appliance in appliances {
        let device_name = appliance.device.name.as_str();

        let readings = match decode_appliance(appliance) {
            Ok(readings) => readings,
            Err(e) => {
                warn!("Skipping Echonet Lite appliance {}: {}", device_name, e);
                metrics.record_decode_error(device_name, &e);
                continue;
            }
        };

        for (kind, reading) in readings {
            match reading {
                Ok(reading) => {
                    debug!("{} {} = {}", device_name, kind.label(), reading.value);
                    metrics.record_reading(device_name, kind, &reading);
                }
                Err(e) => {
                    warn!(
                        "Failed to calculate {} for {}: {}",
                        kind.label(),
                        device_name,
                        e
                    );
                    metrics.record_decode_error(device_name, &e);
                }
            }
        }
    }
}

/// Collects smart-meter readings from the Echonet Lite appliances endpoint
pub async fn collect_echonet_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    ctx.metrics.reset_echonet();

    let status = collect_with_handler(
        "echonet lite",
        ctx.client.get_echonetlite_appliances(),
        |appliances| record_appliances(ctx.metrics, &appliances),
    )
    .await?;

    if status == CollectionStatus::Failed {
        ctx.metrics.record_collection_error("echonet_lite");
    }
    Ok(status)
}
