//! Testing utilities for the validator.

use alloy_primitives::Address;

use crate::env::Environment;
use crate::events::ValidatorEvent;

/// In-memory [`Environment`] that records every emitted event.
#[derive(Clone, Debug, Default)]
pub struct MockEnv {
    sender: Address,
    block_timestamp: u64,
    events: Vec<ValidatorEvent>,
}

impl MockEnv {
    pub fn new(sender: Address) -> Self {
        MockEnv {
            sender,
            block_timestamp: 0,
            events: vec![],
        }
    }

    pub fn with_sender(self, sender: Address) -> Self {
        Self { sender, ..self }
    }

    pub fn with_block_timestamp(self, block_timestamp: u64) -> Self {
        Self {
            block_timestamp,
            ..self
        }
    }

    pub fn set_block_timestamp(&mut self, block_timestamp: u64) {
        self.block_timestamp = block_timestamp;
    }

    pub fn events(&self) -> &[ValidatorEvent] {
        &self.events
    }

    /// Drain recorded events, e.g. between calls.
    pub fn take_events(&mut self) -> Vec<ValidatorEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Environment for MockEnv {
    fn sender(&self) -> Address {
        self.sender
    }

    fn block_timestamp(&self) -> u64 {
        self.block_timestamp
    }

    fn emit_event(&mut self, event: ValidatorEvent) {
        self.events.push(event);
    }
}
