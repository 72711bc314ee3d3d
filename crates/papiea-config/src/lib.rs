#![allow(clippy::must_use_candidate)]

pub mod client;
mod env;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use client::ClientConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level configuration of Papiea SDK tools
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connection to the Papiea engine
    pub client: ClientConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
