//! Operations infrastructure for dual-signature validator tooling.
//!
//! - **Config**: YAML-based configuration with fail-fast validation
//! - **Observability**: `tracing` subscriber setup in json or pretty format
//!
//! # Example
//!
//! ```no_run
//! use dualsig_operations::{config::load_config, init_tracing_from_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sigval.yaml")?;
//!     init_tracing_from_config(&config.observability)?;
//!
//!     let params = config.validator.to_params();
//!     tracing::info!(grace_period = params.grace_period, "configuration loaded");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{load_config, ObservabilityConfig, SigvalConfig, ValidatorConfig};
pub use errors::{ConfigError, LoggingError};
pub use observability::{init_tracing, init_tracing_from_config, LogFormat};
