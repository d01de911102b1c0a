// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proxy configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! label = "checkout"
//! log_payloads = true
//! warn_unhandled_errors = false
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Tunables for a single `EventProxy`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
    /// Name attached to every log line emitted by the proxy
    pub label: String,
    /// Include JSON payloads in trace-level logs
    pub log_payloads: bool,
    /// Warn when `"error"` is triggered and nothing is listening
    pub warn_unhandled_errors: bool,
}

impl ProxyConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            label: "eventproxy".to_string(),
            log_payloads: false,
            warn_unhandled_errors: true,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
