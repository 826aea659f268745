//! Client configuration
//!
//! Settings come from an optional TOML file; anything the file leaves out
//! takes the default. The CLI layers its flags on top.
//!
//! ```toml
//! base_url = "http://rules.internal:8080/"
//! timeout_ms = 30000
//! log_profile = "production"
//! ```

use std::path::Path;
use std::time::Duration;

use rulescope_core::logging_facility::Profile;
use serde::Deserialize;

use crate::errors::{config_error, io_error, Result};

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Effective client settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend root; endpoints are joined under it
    pub base_url: String,
    /// Upper bound on each request, in milliseconds
    pub timeout_ms: u64,
    pub log_profile: Profile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_profile: Profile::default(),
        }
    }
}

impl ClientConfig {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` for invalid TOML, unknown keys, or an empty base URL.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(text).map_err(|e| config_error(&e.to_string()))?;
        config.normalized()
    }

    /// Read settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Config` if it does not parse.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&text)
    }

    /// Replace the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validate and bring the base URL to its canonical `.../` form
    ///
    /// # Errors
    ///
    /// Returns `Config` when the base URL is blank or the timeout is zero.
    pub fn normalized(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(config_error("base_url must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(config_error("timeout_ms must be greater than zero"));
        }
        self.base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
