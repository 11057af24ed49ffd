//! Splitting of the packed dual-signature blob.
//!
//! ```text
//! | Field | Offset | Size | Description              |
//! |-------|--------|------|--------------------------|
//! | r1    | 0      | 32   | attestor signature r     |
//! | s1    | 32     | 32   | attestor signature s     |
//! | v1    | 64     | 1    | attestor recovery byte   |
//! | r2    | 65     | 32   | user signature r         |
//! | s2    | 97     | 32   | user signature s         |
//! | v2    | 129    | 1    | user recovery byte       |
//! ```

use alloy_primitives::{B256, U256};

use crate::error::MalformedInput;
use crate::policy::SignerRole;

/// Length of one `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Length of the packed blob carrying both signatures.
pub const DUAL_SIGNATURE_LENGTH: usize = 2 * SIGNATURE_LENGTH;

/// One ECDSA signature in `(v, r, s)` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignatureParts {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

impl SignatureParts {
    /// Decode from the standard 65-byte `r ‖ s ‖ v` layout.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }

    /// Encode to the standard 65-byte `r ‖ s ‖ v` layout.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    /// `s` as an integer, for the low-s check.
    pub fn s_value(&self) -> U256 {
        U256::from_be_bytes(self.s.0)
    }
}

/// The two signatures carried by a user operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DualSignature {
    pub attestor: SignatureParts,
    pub user: SignatureParts,
}

impl DualSignature {
    /// Split a 130-byte blob into its two signatures.
    ///
    /// Any other length fails with [`MalformedInput::InvalidInputLength`] and
    /// nothing is decoded.
    pub fn split(signatures: &[u8]) -> Result<Self, MalformedInput> {
        let invalid_length = || MalformedInput::InvalidInputLength {
            expected: DUAL_SIGNATURE_LENGTH,
            actual: signatures.len(),
        };

        if signatures.len() != DUAL_SIGNATURE_LENGTH {
            return Err(invalid_length());
        }

        let (first, second) = signatures
            .split_first_chunk::<SIGNATURE_LENGTH>()
            .ok_or_else(invalid_length)?;
        let second: &[u8; SIGNATURE_LENGTH] =
            second.try_into().map_err(|_| invalid_length())?;

        Ok(Self {
            attestor: SignatureParts::from_bytes(first),
            user: SignatureParts::from_bytes(second),
        })
    }

    /// Build from two 65-byte signatures in role order.
    pub fn from_parts(attestor: SignatureParts, user: SignatureParts) -> Self {
        Self { attestor, user }
    }

    /// The signature occupying the slot assigned to `role`.
    pub fn get(&self, role: SignerRole) -> &SignatureParts {
        match role {
            SignerRole::Attestor => &self.attestor,
            SignerRole::User => &self.user,
        }
    }

    /// Re-concatenate both signatures into the packed blob.
    pub fn to_bytes(&self) -> [u8; DUAL_SIGNATURE_LENGTH] {
        let mut out = [0u8; DUAL_SIGNATURE_LENGTH];
        out[..SIGNATURE_LENGTH].copy_from_slice(&self.attestor.to_bytes());
        out[SIGNATURE_LENGTH..].copy_from_slice(&self.user.to_bytes());
        out
    }

    /// Positional view `(v1, r1, s1, v2, r2, s2)`.
    pub fn into_triples(self) -> (u8, B256, B256, u8, B256, B256) {
        (
            self.attestor.v,
            self.attestor.r,
            self.attestor.s,
            self.user.v,
            self.user.r,
            self.user.s,
        )
    }
}

/// Split a packed blob into `(v1, r1, s1, v2, r2, s2)`.
pub fn split(signatures: &[u8]) -> Result<(u8, B256, B256, u8, B256, B256), MalformedInput> {
    DualSignature::split(signatures).map(DualSignature::into_triples)
}
