// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event proxy

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by proxy operations that can reject their input
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("event name is reserved: {0}")]
    ReservedEvent(String),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors from loading a `ProxyConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
