//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadError {
        /// Path of the unreadable file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A config file could not be parsed as TOML.
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// Path of the malformed file
        path: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// A field failed validation.
    #[error("invalid config: {field}: {message}")]
    ValidationError {
        /// The offending field
        field: String,
        /// What was wrong with it
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
