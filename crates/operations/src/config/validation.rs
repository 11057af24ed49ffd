//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning.

use dualsig_core::MAX_TIMESTAMP;

use crate::config::types::{ObservabilityConfig, SigvalConfig, ValidatorConfig};
use crate::errors::ConfigError;

/// Minimum grace period: 1 second.
const MIN_GRACE_PERIOD: u64 = 1;

/// Validate the entire configuration.
pub fn validate_config(config: &SigvalConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_validator_config(&config.validator, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_validator_config(config: &ValidatorConfig, errors: &mut Vec<String>) {
    if config.grace_period_secs < MIN_GRACE_PERIOD {
        errors.push(format!(
            "validator.grace_period_secs must be at least {} second(s)",
            MIN_GRACE_PERIOD
        ));
    }

    // validUntil is a 48-bit field
    if config.grace_period_secs > MAX_TIMESTAMP {
        errors.push(format!(
            "validator.grace_period_secs must be at most {} (48-bit timestamp)",
            MAX_TIMESTAMP
        ));
    }

    if config.authority.is_some_and(|authority| authority.is_zero()) {
        errors.push("validator.authority cannot be the zero address".to_string());
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_level '{}' is invalid. Valid levels: trace, debug, info, warn, error",
            config.log_level
        ));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.log_format.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is invalid. Valid formats: json, pretty",
            config.log_format
        ));
    }
}
