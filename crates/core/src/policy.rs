//! Two-role authorization policy and the single-pass validation it drives.
//!
//! Every operation must carry one signature from the deployment-time
//! authority (the attestor) and one from the user bound to the referenced
//! proof record. Both sign the record's proof hash.

use std::fmt;

use alloy_primitives::Address;

use crate::error::{MalformedInput, ValidatorResult};
use crate::outcome::ValidationOutcome;
use crate::record::ProofRecord;
use crate::recovery::recover_role;
use crate::split::DualSignature;

/// The two authorization slots of a dual signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignerRole {
    /// Fixed co-signer configured when the validator is deployed.
    Attestor,
    /// Address bound to the proof record being referenced.
    User,
}

impl SignerRole {
    /// Roles in blob order.
    pub const ALL: [SignerRole; 2] = [SignerRole::Attestor, SignerRole::User];

    pub fn as_str(self) -> &'static str {
        match self {
            SignerRole::Attestor => "attestor",
            SignerRole::User => "user",
        }
    }
}

impl fmt::Display for SignerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addresses recovered from each slot of a dual signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecoveredSigners {
    pub attestor: Address,
    pub user: Address,
}

impl RecoveredSigners {
    pub fn get(&self, role: SignerRole) -> Address {
        match role {
            SignerRole::Attestor => self.attestor,
            SignerRole::User => self.user,
        }
    }
}

/// Authorization rule: attestor == authority AND user == record.user_address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualSignerPolicy {
    authority: Address,
}

impl DualSignerPolicy {
    pub const fn new(authority: Address) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    /// The address `role` must recover to for `record`.
    pub fn expected_signer(&self, role: SignerRole, record: &ProofRecord) -> Address {
        match role {
            SignerRole::Attestor => self.authority,
            SignerRole::User => record.user_address,
        }
    }

    /// Roles whose recovered signer differs from the expected one.
    pub fn mismatched_roles(
        &self,
        record: &ProofRecord,
        signers: &RecoveredSigners,
    ) -> Vec<SignerRole> {
        SignerRole::ALL
            .into_iter()
            .filter(|role| signers.get(*role) != self.expected_signer(*role, record))
            .collect()
    }

    pub fn is_authorized(&self, record: &ProofRecord, signers: &RecoveredSigners) -> bool {
        self.mismatched_roles(record, signers).is_empty()
    }

    /// Success window when both roles match, failure sentinel otherwise.
    pub fn evaluate(
        &self,
        record: &ProofRecord,
        signers: &RecoveredSigners,
        now: u64,
        grace: u64,
    ) -> ValidatorResult<ValidationOutcome> {
        if self.is_authorized(record, signers) {
            ValidationOutcome::success(now, grace)
        } else {
            Ok(ValidationOutcome::FAILURE)
        }
    }
}

/// Hooks invoked at each step of a validation. They observe only.
pub trait ValidationObserver {
    /// Signatures decoded, recovery about to start.
    fn pre_check(&mut self, _record: &ProofRecord) {}

    /// A slot's signer has been recovered.
    fn signer_recovered(&mut self, _role: SignerRole, _signer: Address) {}

    /// Final verdict reached.
    fn evaluated(&mut self, _record: &ProofRecord, _evaluation: &Evaluation) {}
}

impl ValidationObserver for () {}

/// Terminal state of a validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub signers: RecoveredSigners,
    pub authorized: bool,
    pub outcome: ValidationOutcome,
}

/// A validation whose signatures are decoded but not yet evaluated.
///
/// [`evaluate`](Self::evaluate) consumes it, so a request is evaluated at
/// most once.
#[derive(Clone, Debug)]
pub struct PendingValidation<'a> {
    record: &'a ProofRecord,
    signatures: DualSignature,
}

impl<'a> PendingValidation<'a> {
    pub fn new(record: &'a ProofRecord, signature_blob: &[u8]) -> Result<Self, MalformedInput> {
        Ok(Self {
            record,
            signatures: DualSignature::split(signature_blob)?,
        })
    }

    pub fn signatures(&self) -> &DualSignature {
        &self.signatures
    }

    /// Recover both signers against the record's proof hash and apply `policy`.
    pub fn evaluate(
        self,
        policy: &DualSignerPolicy,
        now: u64,
        grace: u64,
        observer: &mut dyn ValidationObserver,
    ) -> ValidatorResult<Evaluation> {
        observer.pre_check(self.record);

        let digest = self.record.proof_hash;
        let attestor = recover_role(digest, &self.signatures, SignerRole::Attestor)?;
        observer.signer_recovered(SignerRole::Attestor, attestor);
        let user = recover_role(digest, &self.signatures, SignerRole::User)?;
        observer.signer_recovered(SignerRole::User, user);

        let signers = RecoveredSigners { attestor, user };
        let outcome = policy.evaluate(self.record, &signers, now, grace)?;
        let evaluation = Evaluation {
            signers,
            authorized: outcome.is_success(),
            outcome,
        };
        observer.evaluated(self.record, &evaluation);

        Ok(evaluation)
    }
}
