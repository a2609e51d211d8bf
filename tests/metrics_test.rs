use chrono::{TimeZone, Utc};
use natureremo_exporter::echonet::{PowerKind, Reading};
use natureremo_exporter::error::EchonetError;
use natureremo_exporter::metrics::MetricsCollector;

#[test]
fn test_metrics_registration() {
    // Verify that all metrics can be created and registered without panicking
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");

    let rendered = metrics.render();
    assert!(rendered.is_ok(), "Failed to render metrics");

    // GaugeVec metrics only appear once they have values set
    let output = rendered.unwrap();
    assert!(output.contains("natureremo_up"), "Missing natureremo_up metric");
    assert!(!output.contains("natureremo_natureremo_"));
}

#[test]
fn test_record_reading() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");
    let observed_at = Utc.timestamp_opt(1_714_564_800, 0).unwrap();

    metrics.record_reading(
        "Remo E",
        PowerKind::Instantaneous,
        &Reading {
            value: 272.0,
            observed_at: Some(observed_at),
        },
    );

    let rendered = metrics.render().unwrap();
    assert!(rendered
        .contains("natureremo_echonet_lite{device_name=\"Remo E\",type=\"instantaneous_power\"} 272"));
    assert!(rendered.contains(
        "natureremo_echonet_lite_timestamp_seconds{device_name=\"Remo E\",type=\"instantaneous_power\"} 1714564800"
    ));
}

#[test]
fn test_record_reading_without_observation_skips_timestamp() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");

    metrics.record_reading(
        "Remo E",
        PowerKind::Cumulative,
        &Reading {
            value: 10.0,
            observed_at: None,
        },
    );

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("natureremo_echonet_lite{"));
    assert!(!rendered.contains("natureremo_echonet_lite_timestamp_seconds{"));
}

#[test]
fn test_record_device_event() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");
    let created_at = Utc.timestamp_opt(1_714_564_800, 500_000_000).unwrap();

    metrics.record_device_event("Living Room", "te", 23.5, created_at);

    assert_eq!(
        metrics
            .device_events
            .with_label_values(&["Living Room", "te"])
            .get(),
        23.5
    );
    assert_eq!(
        metrics
            .device_event_timestamp_seconds
            .with_label_values(&["Living Room", "te"])
            .get(),
        1_714_564_800.5
    );
}

#[test]
fn test_decode_errors_accumulate() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");
    let error = EchonetError::UnexpectedUnitCode { code: 0x05 };

    metrics.record_decode_error("Remo E", &error);
    metrics.record_decode_error("Remo E", &error);
    metrics.reset();

    // Counters survive a reset
    assert_eq!(
        metrics
            .echonet_lite_errors_total
            .with_label_values(&["Remo E", "unexpected_unit_code"])
            .get(),
        2
    );
}

#[test]
fn test_metrics_reset() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");

    metrics.record_device_event("Living Room", "hu", 48.0, Utc::now());
    metrics
        .echonet_lite
        .with_label_values(&["Remo E", "cumulative_power"])
        .set(5791.4);

    metrics.reset();

    let rendered = metrics.render().expect("Failed to render after reset");
    assert!(!rendered.contains("Living Room"));
    assert!(!rendered.contains("Remo E"));
}
