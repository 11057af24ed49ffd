//! Audit events emitted by the validator.

use alloy_primitives::{Address, B256};
use dualsig_core::{ProofId, ProofRecord, SignerRole};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidatorEvent {
    /// A proof record was stored.
    ProofEnabled { proof_id: ProofId, record: ProofRecord },

    /// A proof record was zeroed.
    ProofDisabled { proof_id: ProofId },

    /// Signatures decoded; recovery is about to start.
    PreCheck { proof_id: ProofId, op_hash: B256 },

    /// One slot's signer was recovered.
    SignerRecovered { role: SignerRole, signer: Address },

    /// Combined verdict of a validation.
    SignaturesVerified {
        attestor: Address,
        user: Address,
        proof_hash: B256,
        op_hash: B256,
        valid: bool,
    },
}

impl ValidatorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ValidatorEvent::ProofEnabled { .. } => "ProofEnabled",
            ValidatorEvent::ProofDisabled { .. } => "ProofDisabled",
            ValidatorEvent::PreCheck { .. } => "PreCheck",
            ValidatorEvent::SignerRecovered { .. } => "SignerRecovered",
            ValidatorEvent::SignaturesVerified { .. } => "SignaturesVerified",
        }
    }
}
