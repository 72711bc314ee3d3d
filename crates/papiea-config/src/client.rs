use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Connection to a Papiea engine
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the engine, e.g. `http://localhost:3000`
    pub base_url: Url,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<SecretString>,
    /// Whole-request timeout such as `"30s"`; unset means no timeout
    #[serde(default)]
    pub timeout: Option<String>,
}

impl ClientConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|s| duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid client timeout '{s}': {e}")))
            .transpose()
    }
}
