//! Nature Remo Cloud API Client
//!
//! Thin wrapper around `reqwest` for the two read-only endpoints the exporter needs.
//!
//! # Authentication
//!
//! Every request carries `Authorization: Bearer <token>` using the access token issued at
//! <https://home.nature.global>.
//!
//! # Example
//!
//! ```no_run
//! use natureremo_exporter::config::NatureRemoConfig;
//! use natureremo_exporter::natureremo::NatureRemoClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = NatureRemoConfig {
//!     api_url: "https://api.nature.global".to_string(),
//!     token: SecretString::from("your-access-token"),
//!     request_timeout_seconds: 10,
//! };
//!
//! let client = NatureRemoClient::new(&config)?;
//! let appliances = client.get_echonetlite_appliances().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::NatureRemoConfig;
use crate::error::{ExporterError, Result};
use crate::natureremo::types::{Appliance, Device, EchonetLiteAppliances};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the Nature Remo Cloud API
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct NatureRemoClient {
    base_url: String,
    token: SecretString,
    http: reqwest::Client,
}

impl NatureRemoClient {
    pub fn new(config: &NatureRemoConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("natureremo-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http,
        })
    }

    /// Query all devices with their newest sensor events
    pub async fn get_devices(&self) -> Result<Vec<Device>> {
        self.get("/1/devices").await
    }

    /// Query Echonet Lite appliances (smart meters) and their properties
    pub async fn get_echonetlite_appliances(&self) -> Result<Vec<Appliance>> {
        let envelope: EchonetLiteAppliances = self.get("/1/echonetlite/appliances").await?;
        Ok(envelope.appliances)
    }

    async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::NatureRemoApi {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
