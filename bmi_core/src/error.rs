//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage key contains characters that can't be used as a file name
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Unrecognized unit or gender text
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
