//! Error types for configuration operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, loading or saving a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading or writing a configuration file
    #[error("IO error on {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A file pattern is not a valid glob
    #[error("Invalid glob pattern `{pattern}`: {reason}")]
    InvalidGlob {
        /// The offending pattern as written
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// An override declares no file patterns
    #[error("Override #{0} has an empty `files` list")]
    EmptyFilePatterns(usize),

    /// The same plugin is listed twice
    #[error("Plugin listed more than once: {0}")]
    DuplicatePlugin(String),

    /// No preset with the given name
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// File name does not map to a supported configuration format
    #[error("Unsupported configuration file: {0}")]
    UnsupportedFormat(PathBuf),

    /// Discovery found nothing between the start directory and the root
    #[error("No configuration file found from {0}")]
    NoConfigFound(PathBuf),
}

impl ConfigError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
