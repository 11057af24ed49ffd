//! EIP-4337 (v0.6) user operation.

use alloy_primitives::{Address, Bytes, U256};

/// A user operation as handed to `validateUserOp`.
///
/// Only [`signature`](Self::signature) is read during validation; the other
/// fields belong to the entry-point protocol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

impl UserOperation {
    /// An operation carrying only a signature, for callers that have nothing else.
    pub fn with_signature(signature: impl Into<Bytes>) -> Self {
        Self {
            signature: signature.into(),
            ..Default::default()
        }
    }
}
