//! Nature Remo Cloud API Type Definitions
//!
//! Response shapes for the two endpoints the exporter reads.
//!
//! # API Endpoints Covered
//!
//! - `GET /1/devices` → [`Device`], [`SensorEvent`]
//! - `GET /1/echonetlite/appliances` → [`EchonetLiteAppliances`], [`Appliance`], [`EchonetProperty`]
//!
//! Fields the exporter never reads are omitted; serde ignores unknown fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// A Nature Remo device and its latest sensor readings
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    /// Keyed by event type: `te` (temperature), `hu` (humidity), `il` (illuminance),
    /// `mo` (movement)
    #[serde(default)]
    pub newest_events: HashMap<String, SensorEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorEvent {
    pub val: f64,
    pub created_at: DateTime<Utc>,
}

/// Envelope returned by `/1/echonetlite/appliances`
#[derive(Debug, Clone, Deserialize)]
pub struct EchonetLiteAppliances {
    #[serde(default)]
    pub appliances: Vec<Appliance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Appliance {
    pub id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(rename = "type", default)]
    pub appliance_type: String,
    pub device: ApplianceDevice,
    #[serde(default)]
    pub properties: Vec<EchonetProperty>,
}

/// The Nature Remo device bridging an Echonet Lite appliance
#[derive(Debug, Clone, Deserialize)]
pub struct ApplianceDevice {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EchonetProperty {
    #[serde(default)]
    pub name: String,
    /// EPC as two lowercase hex characters
    #[serde(deserialize_with = "deserialize_epc")]
    pub epc: String,
    pub val: String,
    pub updated_at: DateTime<Utc>,
}

/// The public API sends the EPC as an integer (`224`); older clients model it as the hex
/// string (`"e0"`). Both are normalized to the hex form.
fn deserialize_epc<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEpc {
        Code(u64),
        Text(String),
    }

    Ok(match RawEpc::deserialize(deserializer)? {
        RawEpc::Code(code) => format!("{:02x}", code),
        RawEpc::Text(text) => text,
    })
}
