//! Dual-ECDSA signature validation for account-abstraction proof records.
//!
//! A user operation is authorized when its 130-byte signature field carries
//! two secp256k1 signatures over a stored proof hash: one from a fixed
//! attestor and one from the user bound to the proof record.
//!
//! # Pipeline
//!
//! 1. [`DualSignature::split`] - decode the blob into two `(v, r, s)` triples
//! 2. [`recover_both`] - recover both signers against the same digest
//! 3. [`DualSignerPolicy::evaluate`] - compare against the expected signers
//!    and produce a [`ValidationOutcome`]
//!
//! [`PendingValidation`] runs all three steps once and reports each one to a
//! [`ValidationObserver`].
//!
//! # Usage
//!
//! ```text
//! use dualsig_core::{DualSignerPolicy, PendingValidation, DEFAULT_GRACE_PERIOD_SECS};
//!
//! let policy = DualSignerPolicy::new(authority);
//! let evaluation = PendingValidation::new(&record, &op.signature)?
//!     .evaluate(&policy, now, DEFAULT_GRACE_PERIOD_SECS, &mut ())?;
//! let validation_data = evaluation.outcome.pack();
//! ```

pub mod error;
pub mod outcome;
pub mod policy;
pub mod record;
pub mod recovery;
pub mod split;

pub use error::{MalformedInput, SignatureError, ValidatorError, ValidatorResult};
pub use outcome::{
    ValidationOutcome, DEFAULT_GRACE_PERIOD_SECS, MAX_TIMESTAMP, SIG_VALIDATION_FAILED,
};
pub use policy::{
    DualSignerPolicy, Evaluation, PendingValidation, RecoveredSigners, SignerRole,
    ValidationObserver,
};
pub use record::{
    DisablePayload, EnablePayload, ProofId, ProofRecord, ENABLE_PAYLOAD_LENGTH,
    ENABLE_PAYLOAD_MIN_LENGTH, PROOF_ID_LENGTH, RECORD_ENCODED_LENGTH,
};
pub use recovery::{recover_both, recover_role, recover_signer, SECP256K1N_HALF};
pub use split::{split, DualSignature, SignatureParts, DUAL_SIGNATURE_LENGTH, SIGNATURE_LENGTH};
