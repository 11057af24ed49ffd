//! Stateful dual-signature validator for account-abstraction user operations.
//!
//! This crate wires the pipeline from `dualsig_core` to proof-record storage
//! and a host environment:
//!
//! - [`DualSigValidator::enable`] / [`DualSigValidator::disable`] manage proof records
//! - [`DualSigValidator::validate_user_op`] checks a user operation's dual signature
//! - [`DualSigValidator::smart_action_proofs`] reads a record
//!
//! # Usage
//!
//! ```text
//! use dualsig_validator::{DualSigValidator, MemoryProofStore, ValidatorParams};
//!
//! // The deploying caller becomes the attestor authority.
//! let mut validator = DualSigValidator::deploy(MemoryProofStore::new(), ValidatorParams::default(), &env);
//! validator.enable(&enable_data, &mut env)?;
//!
//! let outcome = validator.validate_user_op(&op, op_hash, proof_id, &mut env)?;
//! let validation_data = outcome.pack();
//! ```

pub mod env;
pub mod events;
pub mod store;
pub mod testing;
pub mod user_op;
pub mod validator;

pub use env::Environment;
pub use events::ValidatorEvent;
pub use store::{MemoryProofStore, ProofStore};
pub use user_op::UserOperation;
pub use validator::{DualSigValidator, ValidatorParams};
