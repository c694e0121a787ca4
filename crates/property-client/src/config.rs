//! Client configuration loaded via OrthoConfig.
//!
//! Values come from configuration files and `PROPERTY_CLIENT_*` environment
//! variables; unset values fall back to the defaults below.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::error::ClientError;
use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, RetryPolicy};

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Connection, retry and storage settings for the client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROPERTY_CLIENT")]
pub struct ClientSettings {
    /// Base URL of the property API.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Retries after the initial attempt.
    pub max_retries: Option<u32>,
    /// Delay before the first retry in milliseconds.
    pub retry_base_delay_ms: Option<u64>,
    /// Directory holding the local key-value file.
    pub columns_dir: Option<String>,
}

impl ClientSettings {
    /// Parsed API base URL, defaulting to `http://localhost:3000`.
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] when the URL does not parse.
    pub fn api_url(&self) -> Result<Url, ClientError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).map_err(|err| ClientError::Configuration {
            message: format!("invalid api_url {raw}: {err}"),
        })
    }

    /// Request timeout, defaulting to three minutes.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Retry policy built from the configured budget and base delay.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            self.retry_base_delay_ms.map_or(DEFAULT_BASE_DELAY, Duration::from_millis),
        )
    }

    /// Directory for the local key-value file, defaulting to the working
    /// directory.
    #[must_use]
    pub fn columns_dir(&self) -> Utf8PathBuf {
        self.columns_dir
            .as_deref()
            .map_or_else(|| Utf8PathBuf::from("."), Utf8PathBuf::from)
    }
}
