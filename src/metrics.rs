//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the Nature Remo exporter.
//!
//! # Metric Categories
//!
//! ## Device Sensors
//! - Newest sensor events (temperature, humidity, illuminance, movement)
//!
//! ## Echonet Lite Smart Meters
//! - Cumulative energy and instantaneous power per appliance
//! - Decode errors per appliance and reason
//!
//! # Timestamps
//!
//! Gauges from the `prometheus` crate carry no sample timestamp, so the time the cloud API
//! reported each value is exported alongside it as a `*_timestamp_seconds` gauge with the
//! same labels.
//!
//! All metrics use the `natureremo_` namespace prefix.

use crate::echonet::{PowerKind, Reading};
use crate::error::EchonetError;
use chrono::{DateTime, Utc};
use prometheus::{Encoder, Gauge, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

const NAMESPACE: &str = "natureremo";

/// Metrics collector for Nature Remo
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    // Device sensor metrics
    pub device_events: Arc<GaugeVec>,
    pub device_event_timestamp_seconds: Arc<GaugeVec>,

    // Echonet Lite metrics
    pub echonet_lite: Arc<GaugeVec>,
    pub echonet_lite_timestamp_seconds: Arc<GaugeVec>,
    pub echonet_lite_errors_total: Arc<IntCounterVec>,

    pub collection_errors_total: Arc<IntCounterVec>,

    pub up: Arc<Gauge>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let device_events = GaugeVec::new(
            Opts::new("device_events", "NatureRemo Device Events").namespace(NAMESPACE),
            &["device_name", "event"],
        )?;

        let device_event_timestamp_seconds = GaugeVec::new(
            Opts::new(
                "device_event_timestamp_seconds",
                "Time the newest device event was created",
            )
            .namespace(NAMESPACE),
            &["device_name", "event"],
        )?;

        let echonet_lite = GaugeVec::new(
            Opts::new("echonet_lite", "NatureRemo Echonet Lite").namespace(NAMESPACE),
            &["device_name", "type"],
        )?;

        let echonet_lite_timestamp_seconds = GaugeVec::new(
            Opts::new(
                "echonet_lite_timestamp_seconds",
                "Time the smart meter reported the source property of an Echonet Lite reading",
            )
            .namespace(NAMESPACE),
            &["device_name", "type"],
        )?;

        let echonet_lite_errors_total = IntCounterVec::new(
            Opts::new(
                "echonet_lite_errors_total",
                "Echonet Lite readings that could not be decoded",
            )
            .namespace(NAMESPACE),
            &["device_name", "reason"],
        )?;

        let collection_errors_total = IntCounterVec::new(
            Opts::new(
                "collection_errors_total",
                "Collection cycles in which an API endpoint could not be queried",
            )
            .namespace(NAMESPACE),
            &["collector"],
        )?;

        let up = Gauge::with_opts(
            Opts::new(
                "up",
                "Whether the last collection from the Nature Remo API succeeded",
            )
            .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(device_events.clone()))?;
        registry.register(Box::new(device_event_timestamp_seconds.clone()))?;
        registry.register(Box::new(echonet_lite.clone()))?;
        registry.register(Box::new(echonet_lite_timestamp_seconds.clone()))?;
        registry.register(Box::new(echonet_lite_errors_total.clone()))?;
        registry.register(Box::new(collection_errors_total.clone()))?;
        registry.register(Box::new(up.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            device_events: Arc::new(device_events),
            device_event_timestamp_seconds: Arc::new(device_event_timestamp_seconds),
            echonet_lite: Arc::new(echonet_lite),
            echonet_lite_timestamp_seconds: Arc::new(echonet_lite_timestamp_seconds),
            echonet_lite_errors_total: Arc::new(echonet_lite_errors_total),
            collection_errors_total: Arc::new(collection_errors_total),
            up: Arc::new(up),
        })
    }

    /// Record one sensor event for a device
    pub fn record_device_event(
        &self,
        device_name: &str,
        event: &str,
        value: f64,
        created_at: DateTime<Utc>,
    ) {
        self.device_events
            .with_label_values(&[device_name, event])
            .set(value);
        self.device_event_timestamp_seconds
            .with_label_values(&[device_name, event])
            .set(unix_seconds(created_at));
    }

    /// Record a decoded smart-meter reading
    ///
    /// The timestamp gauge is only written when the source register was reported.
    pub fn record_reading(&self, device_name: &str, kind: PowerKind, reading: &Reading) {
        self.echonet_lite
            .with_label_values(&[device_name, kind.label()])
            .set(reading.value);
        if let Some(observed_at) = reading.observed_at {
            self.echonet_lite_timestamp_seconds
                .with_label_values(&[device_name, kind.label()])
                .set(unix_seconds(observed_at));
        }
    }

    /// Count a reading that could not be produced
    pub fn record_decode_error(&self, device_name: &str, error: &EchonetError) {
        self.echonet_lite_errors_total
            .with_label_values(&[device_name, error.kind()])
            .inc();
    }

    /// Count a collector whose API query failed this cycle
    pub fn record_collection_error(&self, collector: &str) {
        self.collection_errors_total
            .with_label_values(&[collector])
            .inc();
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Clear device sensor gauges before a fresh collection
    pub fn reset_device_events(&self) {
        self.device_events.reset();
        self.device_event_timestamp_seconds.reset();
    }

    /// Clear Echonet Lite gauges before a fresh collection
    ///
    /// The error counter is cumulative and survives.
    pub fn reset_echonet(&self) {
        self.echonet_lite.reset();
        self.echonet_lite_timestamp_seconds.reset();
    }

    /// Reset all per-cycle metrics
    pub fn reset(&self) {
        self.reset_device_events();
        self.reset_echonet();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}

fn unix_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}
