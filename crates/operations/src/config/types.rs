//! Configuration types for the validator tooling.

use alloy_primitives::Address;
use dualsig_core::DEFAULT_GRACE_PERIOD_SECS;
use dualsig_validator::ValidatorParams;
use serde::Deserialize;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigvalConfig {
    /// Validator deployment parameters.
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Validator deployment configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Seconds a successful validation stays valid. Default: 8.
    #[serde(default = "ValidatorConfig::default_grace_period_secs")]
    pub grace_period_secs: u64,

    /// Address used as the deploying caller, i.e. the attestor authority.
    /// `sigval validate --authority` takes precedence; with neither set the
    /// command fails.
    #[serde(default)]
    pub authority: Option<Address>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: Self::default_grace_period_secs(),
            authority: None,
        }
    }
}

impl ValidatorConfig {
    const fn default_grace_period_secs() -> u64 {
        DEFAULT_GRACE_PERIOD_SECS
    }

    /// Convert to the validator's deployment parameters.
    pub fn to_params(&self) -> ValidatorParams {
        ValidatorParams {
            grace_period: self.grace_period_secs,
        }
    }
}

/// Observability configuration for logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level: trace, debug, info, warn, error. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: pretty.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "pretty".to_string()
    }
}
