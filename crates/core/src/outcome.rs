//! Validity-window outcome and its packed EIP-4337 `validationData` form.
//!
//! ```text
//! | Bits     | Field        | Description                          |
//! |----------|--------------|--------------------------------------|
//! | 0..160   | sigFailure   | 0 = valid, 1 = signature failure     |
//! | 160..208 | validUntil   | 48-bit timestamp, exclusive bound    |
//! | 208..256 | validAfter   | 48-bit timestamp, inclusive bound    |
//! ```

use alloy_primitives::U256;

use crate::error::{ValidatorError, ValidatorResult};

/// Grace period added to the current timestamp on success.
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 8;

/// Largest timestamp representable in a 48-bit window field.
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Marker stored in the aggregator field when signature validation fails.
pub const SIG_VALIDATION_FAILED: U256 = U256::from_limbs([1, 0, 0, 0]);

const VALID_UNTIL_SHIFT: usize = 160;
const VALID_AFTER_SHIFT: usize = 208;

/// Result of evaluating a dual-signed operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValidationOutcome {
    pub valid_after: u64,
    pub valid_until: u64,
    pub sig_failure: bool,
}

impl ValidationOutcome {
    /// Rejection sentinel: a window ending at timestamp 1 has always expired.
    pub const FAILURE: Self = Self {
        valid_after: 0,
        valid_until: 1,
        sig_failure: true,
    };

    /// Success window `[now, now + grace)`.
    pub fn success(now: u64, grace: u64) -> ValidatorResult<Self> {
        let valid_until = now
            .checked_add(grace)
            .filter(|until| *until <= MAX_TIMESTAMP)
            .ok_or(ValidatorError::WindowOverflow { now, grace })?;

        Ok(Self {
            valid_after: now,
            valid_until,
            sig_failure: false,
        })
    }

    pub fn is_success(&self) -> bool {
        !self.sig_failure
    }

    /// Whether the outcome accepts an operation executed at `timestamp`.
    pub fn is_valid_at(&self, timestamp: u64) -> bool {
        !self.sig_failure && self.valid_after <= timestamp && timestamp < self.valid_until
    }

    /// Pack into a single 256-bit word.
    pub fn pack(&self) -> U256 {
        let mut word = (U256::from(self.valid_after & MAX_TIMESTAMP) << VALID_AFTER_SHIFT)
            | (U256::from(self.valid_until & MAX_TIMESTAMP) << VALID_UNTIL_SHIFT);
        if self.sig_failure {
            word |= SIG_VALIDATION_FAILED;
        }
        word
    }

    /// Unpack a word produced by [`pack`](Self::pack).
    ///
    /// Any non-zero aggregator field is read as a signature failure.
    pub fn unpack(word: U256) -> Self {
        let aggregator_mask = (U256::from(1) << VALID_UNTIL_SHIFT) - U256::from(1);
        Self {
            valid_after: (word >> VALID_AFTER_SHIFT).as_limbs()[0] & MAX_TIMESTAMP,
            valid_until: (word >> VALID_UNTIL_SHIFT).as_limbs()[0] & MAX_TIMESTAMP,
            sig_failure: (word & aggregator_mask) != U256::ZERO,
        }
    }
}
