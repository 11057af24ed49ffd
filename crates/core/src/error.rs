//! Error types for dual-signature validation.
//!
//! Structural problems (malformed input, bad signature encoding) are errors
//! and abort the call. An authorization mismatch is *not* an error: it is
//! reported as [`ValidationOutcome::FAILURE`](crate::ValidationOutcome::FAILURE).

use alloy_primitives::U256;
use thiserror::Error;

use crate::policy::SignerRole;

/// Input that could not be decoded into the expected fixed layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    /// Signature blob has the wrong length.
    #[error("invalid input length: expected {expected} bytes, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// Payload ended before every field was read.
    #[error("{payload} payload too short: need at least {required} bytes, got {actual}")]
    PayloadTooShort {
        payload: &'static str,
        required: usize,
        actual: usize,
    },
}

/// Reasons a single signature is rejected before or during recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// `s` lies in the upper half of the curve order (malleable signature).
    #[error("s value {0:#x} is in the upper half of the curve order")]
    HighS(U256),

    /// Recovery byte is not 27 or 28.
    #[error("invalid recovery byte v = {0}, expected 27 or 28")]
    InvalidV(u8),

    /// The curve point could not be recovered.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Recovery produced the zero address.
    #[error("signature recovered to the zero address")]
    ZeroAddress,
}

/// Errors returned by validator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("invalid {role} signature: {source}")]
    InvalidSignature {
        role: SignerRole,
        source: SignatureError,
    },

    /// `now + grace` does not fit in a 48-bit timestamp.
    #[error("validity window overflows 48-bit timestamp (now = {now}, grace = {grace})")]
    WindowOverflow { now: u64, grace: u64 },

    /// Declared operation without an implementation.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}

impl ValidatorError {
    /// Returns true for errors caused by the shape of the caller's input.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ValidatorError::MalformedInput(_))
    }

    /// Returns true for signature encoding or recovery failures.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, ValidatorError::InvalidSignature { .. })
    }
}

/// Result type for validator operations.
pub type ValidatorResult<T> = Result<T, ValidatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidatorError::from(MalformedInput::InvalidInputLength {
            expected: 130,
            actual: 65,
        });
        assert_eq!(
            err.to_string(),
            "malformed input: invalid input length: expected 130 bytes, got 65"
        );

        let err = ValidatorError::InvalidSignature {
            role: SignerRole::User,
            source: SignatureError::InvalidV(0),
        };
        assert_eq!(
            err.to_string(),
            "invalid user signature: invalid recovery byte v = 0, expected 27 or 28"
        );
    }

    #[test]
    fn test_error_classification() {
        let malformed = ValidatorError::from(MalformedInput::PayloadTooShort {
            payload: "enable",
            required: 96,
            actual: 10,
        });
        assert!(malformed.is_malformed_input());
        assert!(!malformed.is_invalid_signature());

        let bad_sig = ValidatorError::InvalidSignature {
            role: SignerRole::Attestor,
            source: SignatureError::ZeroAddress,
        };
        assert!(bad_sig.is_invalid_signature());
        assert!(!bad_sig.is_malformed_input());
    }
}
