//! Observability setup.
//!
//! Library crates log through `tracing` macros only; binaries install the
//! subscriber once at startup.

pub mod logging;

pub use logging::{init_tracing, init_tracing_from_config, LogFormat};
