//! Error types shared across the harness

use thiserror::Error;

/// Result type alias using the common harness Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the common layer (configuration and external services)
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("extension bundle not found at {0}")]
    ExtensionNotFound(String),

    #[error("extension bundle at {0} has no manifest.json")]
    ManifestMissing(String),

    #[error("Blockfrost request failed: {0}")]
    Blockfrost(#[from] reqwest::Error),

    #[error("unexpected Blockfrost response: {status} for {url}")]
    BlockfrostStatus { status: u16, url: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
