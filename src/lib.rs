//! Nature Remo Prometheus Exporter
//!
//! A Prometheus metrics exporter for Nature Remo devices and the Echonet Lite smart
//! meters bridged by Nature Remo E.
//!
//! # Overview
//!
//! The exporter polls the Nature Remo Cloud API, decodes the hex register values reported
//! by smart electric energy meters into power readings, and exposes everything in
//! Prometheus format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐       HTTPS         ┌──────────────┐
//! │ Nature Remo │ ◄─────────────────► │   Exporter   │
//! │  Cloud API  │   Bearer token      │              │
//! └─────────────┘                     │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                     │  │ Client │  │ ◄────────────► │ Prometheus │
//!                                     │  └────────┘  │   /metrics     └────────────┘
//!                                     │  ┌────────┐  │
//!                                     │  │Echonet │  │
//!                                     │  └────────┘  │
//!                                     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`echonet`] - Smart-meter register decoding
//! - [`natureremo`] - Cloud API client and type definitions
//! - [`collectors`] - Per-endpoint metric collectors
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server and collection loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use natureremo_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     config.validate()?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod echonet;
pub mod error;
pub mod metrics;
pub mod natureremo;
pub mod server;
