//! Error types for the operations crate.

use thiserror::Error;

/// Errors loading a sigval YAML config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sigval config file could not be read.
    #[error("cannot read sigval config '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// Not valid YAML, an unknown key, or a malformed address.
    #[error("invalid sigval config '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    /// Every out-of-range validator or observability setting.
    #[error("sigval config rejected:\n{}", .0.join("\n"))]
    ValidationFailed(Vec<String>),
}

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level string is not a valid filter directive.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}
