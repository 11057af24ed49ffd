//! The dual-signature validator module.

use alloy_primitives::{Address, B256, U256};
use dualsig_core::{
    DisablePayload, DualSignerPolicy, EnablePayload, Evaluation, PendingValidation, ProofId,
    ProofRecord, SignerRole, ValidationObserver, ValidationOutcome, ValidatorError,
    ValidatorResult, DEFAULT_GRACE_PERIOD_SECS,
};

use crate::env::Environment;
use crate::events::ValidatorEvent;
use crate::store::ProofStore;
use crate::user_op::UserOperation;

/// Deployment parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatorParams {
    /// Seconds added to the block timestamp for a successful validation.
    pub grace_period: u64,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD_SECS,
        }
    }
}

/// Validates user operations against stored proof records.
///
/// The authority (attestor) is fixed at deployment to the deploying caller.
/// Proof records are created by [`enable`](Self::enable), zeroed by
/// [`disable`](Self::disable) and read by
/// [`validate_user_op`](Self::validate_user_op).
#[derive(Debug)]
pub struct DualSigValidator<S> {
    store: S,
    policy: DualSignerPolicy,
    params: ValidatorParams,
}

impl<S: ProofStore> DualSigValidator<S> {
    /// Deploy with the caller of `env` as the authority.
    pub fn deploy(store: S, params: ValidatorParams, env: &dyn Environment) -> Self {
        let authority = env.sender();
        tracing::info!(
            authority = %authority,
            grace_period = params.grace_period,
            "dual-signature validator deployed"
        );
        Self {
            store,
            policy: DualSignerPolicy::new(authority),
            params,
        }
    }

    pub fn authority(&self) -> Address {
        self.policy.authority()
    }

    pub fn grace_period(&self) -> u64 {
        self.params.grace_period
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store the record encoded in `data` under its proof id.
    ///
    /// Fails without touching storage if the payload cannot be decoded.
    pub fn enable(&mut self, data: &[u8], env: &mut dyn Environment) -> ValidatorResult<()> {
        let EnablePayload { proof_id, record } = EnablePayload::decode(data)?;

        self.store.set(proof_id, record);
        tracing::info!(
            proof_id = %proof_id,
            model_id = record.model_id,
            version_id = record.version_id,
            user = %record.user_address,
            "proof record enabled"
        );
        env.emit_event(ValidatorEvent::ProofEnabled { proof_id, record });
        Ok(())
    }

    /// Zero the record whose id is the first 32 bytes of `data`.
    pub fn disable(&mut self, data: &[u8], env: &mut dyn Environment) -> ValidatorResult<()> {
        let DisablePayload { proof_id } = DisablePayload::decode(data)?;

        let existed = self.store.remove(&proof_id).is_some();
        tracing::info!(proof_id = %proof_id, existed, "proof record disabled");
        env.emit_event(ValidatorEvent::ProofDisabled { proof_id });
        Ok(())
    }

    /// Read accessor; absent ids read as the all-zero record.
    pub fn smart_action_proofs(&self, proof_id: ProofId) -> ProofRecord {
        self.store.get(&proof_id).unwrap_or_default()
    }

    /// Check the dual signature in `op.signature` against the record at `proof_id`.
    ///
    /// Signatures are recovered against the record's proof hash; `op_hash` is
    /// only reported in events. An authorization mismatch is returned as
    /// [`ValidationOutcome::FAILURE`], while malformed input and invalid
    /// signatures are errors. Events are emitted only when this returns `Ok`.
    pub fn validate_user_op(
        &self,
        op: &UserOperation,
        op_hash: B256,
        proof_id: ProofId,
        env: &mut dyn Environment,
    ) -> ValidatorResult<ValidationOutcome> {
        let record = self.smart_action_proofs(proof_id);
        let now = env.block_timestamp();

        let pending = PendingValidation::new(&record, &op.signature).inspect_err(|err| {
            tracing::warn!(proof_id = %proof_id, %err, "rejecting malformed signature blob");
        })?;

        let mut observer = EventObserver::new(proof_id, op_hash);
        let evaluation = pending
            .evaluate(&self.policy, now, self.params.grace_period, &mut observer)
            .inspect_err(|err| {
                tracing::warn!(proof_id = %proof_id, %err, "signature validation aborted");
            })?;
        for event in observer.events {
            env.emit_event(event);
        }

        if !evaluation.authorized {
            let mismatched = self.policy.mismatched_roles(&record, &evaluation.signers);
            tracing::warn!(
                proof_id = %proof_id,
                ?mismatched,
                "dual signature not authorized"
            );
        }

        Ok(evaluation.outcome)
    }

    /// Declared in the module interface without an implementation.
    pub fn validate_signature(
        &self,
        _hash: B256,
        _signature: &[u8],
        _env: &dyn Environment,
    ) -> ValidatorResult<U256> {
        Err(ValidatorError::Unsupported("validate_signature"))
    }

    /// Declared in the module interface without an implementation.
    pub fn valid_caller(&self, _caller: Address, _data: &[u8]) -> ValidatorResult<bool> {
        Err(ValidatorError::Unsupported("valid_caller"))
    }
}

/// Buffers validation steps as events.
///
/// The buffer reaches the environment only once evaluation returns `Ok`, so
/// an aborted validation emits nothing.
struct EventObserver {
    proof_id: ProofId,
    op_hash: B256,
    events: Vec<ValidatorEvent>,
}

impl EventObserver {
    fn new(proof_id: ProofId, op_hash: B256) -> Self {
        Self {
            proof_id,
            op_hash,
            events: Vec::with_capacity(4),
        }
    }
}

impl ValidationObserver for EventObserver {
    fn pre_check(&mut self, _record: &ProofRecord) {
        tracing::debug!(proof_id = %self.proof_id, "recovering dual signature");
        self.events.push(ValidatorEvent::PreCheck {
            proof_id: self.proof_id,
            op_hash: self.op_hash,
        });
    }

    fn signer_recovered(&mut self, role: SignerRole, signer: Address) {
        tracing::debug!(%role, %signer, "signer recovered");
        self.events.push(ValidatorEvent::SignerRecovered { role, signer });
    }

    fn evaluated(&mut self, record: &ProofRecord, evaluation: &Evaluation) {
        tracing::debug!(
            proof_id = %self.proof_id,
            valid = evaluation.authorized,
            valid_after = evaluation.outcome.valid_after,
            valid_until = evaluation.outcome.valid_until,
            "dual signature evaluated"
        );
        self.events.push(ValidatorEvent::SignaturesVerified {
            attestor: evaluation.signers.attestor,
            user: evaluation.signers.user,
            proof_hash: record.proof_hash,
            op_hash: self.op_hash,
            valid: evaluation.authorized,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryProofStore;
    use crate::testing::MockEnv;
    use dualsig_core::MalformedInput;

    const DEPLOYER: Address = Address::repeat_byte(0x11);

    fn deploy() -> (DualSigValidator<MemoryProofStore>, MockEnv) {
        let env = MockEnv::new(DEPLOYER).with_block_timestamp(1_000);
        let validator =
            DualSigValidator::deploy(MemoryProofStore::new(), ValidatorParams::default(), &env);
        (validator, env)
    }

    fn enable_data(id: u64, record: ProofRecord) -> Vec<u8> {
        EnablePayload {
            proof_id: U256::from(id),
            record,
        }
        .encode()
    }

    #[test]
    fn test_deploy_sets_authority_from_sender() {
        let (validator, _env) = deploy();
        assert_eq!(validator.authority(), DEPLOYER);
        assert_eq!(validator.grace_period(), DEFAULT_GRACE_PERIOD_SECS);
    }

    #[test]
    fn test_authority_unchanged_by_later_callers() {
        let (mut validator, env) = deploy();
        let mut env = env.with_sender(Address::repeat_byte(0x99));
        let record = ProofRecord {
            user_address: Address::repeat_byte(0xAA),
            ..Default::default()
        };
        validator.enable(&enable_data(1, record), &mut env).unwrap();
        assert_eq!(validator.authority(), DEPLOYER);
    }

    #[test]
    fn test_enable_rejects_short_payload_without_state_change() {
        let (mut validator, mut env) = deploy();
        let err = validator.enable(&[0u8; 95], &mut env).unwrap_err();
        assert_eq!(
            err,
            ValidatorError::MalformedInput(MalformedInput::PayloadTooShort {
                payload: "enable",
                required: 96,
                actual: 95,
            })
        );
        assert!(validator.store().is_empty());
        assert!(env.events().is_empty());
    }

    #[test]
    fn test_disable_requires_proof_id() {
        let (mut validator, mut env) = deploy();
        let err = validator.disable(&[0u8; 12], &mut env).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_absent_record_reads_zeroed() {
        let (validator, _env) = deploy();
        assert!(validator.smart_action_proofs(U256::from(42)).is_zeroed());
    }

    #[test]
    fn test_enable_emits_event() {
        let (mut validator, mut env) = deploy();
        let record = ProofRecord {
            model_id: 3,
            version_id: 4,
            user_address: Address::repeat_byte(0xAA),
            proof_hash: B256::repeat_byte(0x42),
        };
        validator.enable(&enable_data(5, record), &mut env).unwrap();

        assert_eq!(
            env.events(),
            &[ValidatorEvent::ProofEnabled {
                proof_id: U256::from(5),
                record
            }]
        );
    }

    #[test]
    fn test_malformed_signature_blob_emits_nothing() {
        let (validator, mut env) = deploy();
        let op = UserOperation::with_signature(vec![0u8; 129]);
        let err = validator
            .validate_user_op(&op, B256::ZERO, U256::from(1), &mut env)
            .unwrap_err();
        assert_eq!(
            err,
            ValidatorError::MalformedInput(MalformedInput::InvalidInputLength {
                expected: 130,
                actual: 129
            })
        );
        assert!(env.events().is_empty());
    }

    #[test]
    fn test_stubs_are_unsupported() {
        let (validator, env) = deploy();
        assert_eq!(
            validator.validate_signature(B256::ZERO, &[], &env),
            Err(ValidatorError::Unsupported("validate_signature"))
        );
        assert_eq!(
            validator.valid_caller(Address::ZERO, &[]),
            Err(ValidatorError::Unsupported("valid_caller"))
        );
    }
}
