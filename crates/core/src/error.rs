//! Core error types

use thiserror::Error;

/// Core error type for iotap
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[cfg(feature = "toml")]
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
