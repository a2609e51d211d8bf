use crate::error::ExporterError;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub natureremo: NatureRemoConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NatureRemoConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_token")]
    pub token: SecretString,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_scrape_interval")]
    pub scrape_interval_seconds: u64,
    #[serde(default = "default_true")]
    pub collect_device_events: bool,
    #[serde(default = "default_true")]
    pub collect_echonet_lite: bool,
}

impl Default for NatureRemoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: default_token(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            scrape_interval_seconds: default_scrape_interval(),
            collect_device_events: true,
            collect_echonet_lite: true,
        }
    }
}

fn default_api_url() -> String {
    "https://api.nature.global".to_string()
}

// Supplied through NATURE_REMO_TOKEN in practice; an empty token fails validation.
fn default_token() -> SecretString {
    SecretString::from("")
}

fn default_request_timeout() -> u64 {
    10
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// Nature Remo allows 30 requests per 5 minutes; two requests per minute stays well under.
fn default_scrape_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("NATUREREMO_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Reject settings the exporter cannot run with
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.natureremo.token.expose_secret().trim().is_empty() {
            return Err(ExporterError::Config(
                "Nature Remo access token is empty (set NATURE_REMO_TOKEN)".to_string(),
            ));
        }
        if !self.natureremo.api_url.starts_with("http://")
            && !self.natureremo.api_url.starts_with("https://")
        {
            return Err(ExporterError::Config(format!(
                "Nature Remo API URL must start with http:// or https://, got {}",
                self.natureremo.api_url
            )));
        }
        if self.metrics.scrape_interval_seconds == 0 {
            return Err(ExporterError::Config(
                "scrape_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
