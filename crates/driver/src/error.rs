//! Error types for the browser driver

use std::time::Duration;

use thiserror::Error;

/// Result type alias using DriverError
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Errors raised while driving the extension UI
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("browser setup failed: {0}")]
    Setup(String),

    #[error("browser protocol error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] gero_common::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Timeout constructor used by the polling helpers
    pub fn timeout(what: impl Into<String>, after: Duration) -> Self {
        DriverError::Timeout {
            what: what.into(),
            after,
        }
    }
}
