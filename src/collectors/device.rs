//! Device Sensor Metrics Collector
//!
//! # Metrics Produced
//! - `natureremo_device_events` - Newest value of each device sensor
//!   - Labels: device_name, event (te, hu, il, mo)
//! - `natureremo_device_event_timestamp_seconds` - When that value was recorded
//!   - Labels: device_name, event

use super::{collect_with_handler, CollectionContext, CollectionResult, CollectionStatus};
use tracing::debug;

/// Collects the newest sensor events of every Nature Remo device
///
/// Gauges are cleared before the query so a failed request exports no stale values.
pub async fn collect_device_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    ctx.metrics.reset_device_events();

    let status = collect_with_handler("devices", ctx.client.get_devices(), |devices| {
        for device in devices {
            for (event, reading) in &device.newest_events {
                debug!(
                    "Device {} event {} = {} at {}",
                    device.name, event, reading.val, reading.created_at
                );
                ctx.metrics
                    .record_device_event(&device.name, event, reading.val, reading.created_at);
            }
        }
    })
    .await?;

    if status == CollectionStatus::Failed {
        ctx.metrics.record_collection_error("devices");
    }
    Ok(status)
}
