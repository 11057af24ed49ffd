//! Host environment consumed by the validator.

use alloy_primitives::Address;

use crate::events::ValidatorEvent;

/// What the hosting execution environment provides to each call.
pub trait Environment {
    /// Address of the current caller.
    fn sender(&self) -> Address;

    /// Current block timestamp in seconds.
    fn block_timestamp(&self) -> u64;

    /// Record an observability event. Events never affect control flow.
    fn emit_event(&mut self, event: ValidatorEvent);
}
