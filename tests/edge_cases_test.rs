//! Edge case tests
//!
//! Tests for unusual but valid data scenarios.

use chrono::Utc;
use natureremo_exporter::collectors::record_appliances;
use natureremo_exporter::echonet::RegisterSet;
use natureremo_exporter::metrics::MetricsCollector;
use natureremo_exporter::natureremo::types::Appliance;
use serde_json::json;

fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

#[test]
fn test_empty_collections_render_without_error() {
    // Given: No appliances at all
    let metrics = create_test_metrics();
    record_appliances(&metrics, &[]);

    // Then: Should render successfully with only base metrics
    let rendered = metrics.render().expect("Failed to render");
    assert!(rendered.contains("# HELP"));
    assert!(!rendered.contains("natureremo_echonet_lite{"));
}

#[test]
fn test_appliance_without_properties_reports_defaults() {
    // Given: A smart meter that has not reported anything yet
    let metrics = create_test_metrics();
    let appliance: Appliance = serde_json::from_value(json!({
        "id": "a1",
        "device": {"name": "Remo E", "id": "d1"}
    }))
    .unwrap();

    record_appliances(&metrics, &[appliance]);

    // Then: Default registers yield readings but no timestamps
    let rendered = metrics.render().unwrap();
    assert!(rendered
        .contains("natureremo_echonet_lite{device_name=\"Remo E\",type=\"instantaneous_power\"} 0"));
    assert!(!rendered.contains("natureremo_echonet_lite_timestamp_seconds{"));
}

#[test]
fn test_maximum_counter_values() {
    // Given: Both cumulative counters at their 32-bit maximum with 9 effective digits
    let mut registers = RegisterSet::new();
    let now = Utc::now();
    registers.set_value("d7", "09", now).unwrap();
    registers.set_value("e0", "ffffffff", now).unwrap();
    registers.set_value("e3", "00000000", now).unwrap();
    registers.set_value("d3", "ffffffff", now).unwrap();
    registers.set_value("e1", "0d", now).unwrap();

    // When: Calculating cumulative power
    let reading = registers.cumulative_power().unwrap();

    // Then: The value is finite and positive
    assert!(reading.value.is_finite());
    assert!(reading.value > 0.0);
}

#[test]
fn test_zero_effective_digits() {
    // Given: d7 = 0 gives a range of 10^0 = 1
    let mut registers = RegisterSet::new();
    let now = Utc::now();
    registers.set_value("d7", "00", now).unwrap();
    registers.set_value("e0", "00000003", now).unwrap();

    // Then: 3 + 1 - 0 = 4 > 1, one wrap removed
    assert_eq!(registers.cumulative_power().unwrap().value, 3.0);
}

#[test]
fn test_device_name_with_quotes_and_unicode() {
    let metrics = create_test_metrics();

    metrics.record_device_event("リビング \"main\"", "te", 21.0, Utc::now());

    let rendered = metrics.render().expect("Failed to render");
    assert!(rendered.contains("natureremo_device_events"));
    assert!(rendered.contains("リビング"));
}
