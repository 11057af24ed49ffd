//! `tracing` subscriber initialisation.
//!
//! `RUST_LOG` takes precedence over the configured level. Output goes to
//! stderr so command results on stdout stay machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::errors::LoggingError;

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing.
    Json,
    /// Human-readable format.
    #[default]
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Parse from string, case-insensitive. Unknown values fall back to pretty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        })
    }
}

/// Install the global subscriber from an [`ObservabilityConfig`].
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let format: LogFormat = config.log_format.parse().unwrap_or_default();
    init_tracing(&config.log_level, format)
}

/// Install the global subscriber.
///
/// Fails if `level` is not a valid filter or a subscriber is already set.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(level)?,
    };

    let installed = match format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level.to_lowercase()).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("unknown".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_level_filter_accepts_config_levels() {
        for level in ["trace", "debug", "INFO", "warn", "error"] {
            assert!(level_filter(level).is_ok(), "level '{level}' rejected");
        }
    }

    #[test]
    fn test_level_filter_accepts_directives() {
        assert!(level_filter("info,dualsig_validator=debug").is_ok());
    }
}
