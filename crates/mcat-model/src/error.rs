//! Error types for job configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::JobConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the config schema.
    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Delimiter cannot be used to split records.
    #[error("invalid delimiter {delimiter:?}: must not be a quote or line break")]
    InvalidDelimiter { delimiter: char },

    /// Chunk size must be positive.
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    /// Thread count must be positive when set.
    #[error("threads must be greater than zero")]
    ZeroThreads,

    /// Aggregation year range is empty.
    #[error("invalid aggregation year range [{min_year}, {max_year}]")]
    InvalidYearRange { min_year: i32, max_year: i32 },

    /// A rule override names a column without a rule.
    #[error("no rule for field '{field}'")]
    UnknownField { field: String },

    /// A rule override sets bounds or a default on a non-numeric rule.
    #[error("field '{field}' does not accept numeric overrides")]
    NotNumeric { field: String },

    /// A rule override produces `min > max`.
    #[error("field '{field}' has min {min} greater than max {max}")]
    InvalidBounds { field: String, min: f64, max: f64 },

    /// An integer rule override is not a whole number.
    #[error("field '{field}' takes whole numbers, got {value}")]
    NotInteger { field: String, value: f64 },

    /// A rule override puts the default outside the bounds.
    #[error("field '{field}' default {default} is outside [{min}, {max}]")]
    DefaultOutOfBounds {
        field: String,
        default: f64,
        min: f64,
        max: f64,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
