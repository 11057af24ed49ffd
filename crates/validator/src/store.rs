//! Persistent proof-record storage.

use std::collections::BTreeMap;

use dualsig_core::{ProofId, ProofRecord};

/// Key-value storage for proof records keyed by a 256-bit id.
///
/// Reads of an absent id return `None`; callers treat that as the all-zero
/// record.
pub trait ProofStore {
    fn get(&self, proof_id: &ProofId) -> Option<ProofRecord>;

    fn set(&mut self, proof_id: ProofId, record: ProofRecord);

    /// Remove the record, returning what was stored.
    fn remove(&mut self, proof_id: &ProofId) -> Option<ProofRecord>;

    fn contains(&self, proof_id: &ProofId) -> bool {
        self.get(proof_id).is_some()
    }
}

/// In-memory [`ProofStore`] with deterministic iteration order.
#[derive(Clone, Debug, Default)]
pub struct MemoryProofStore {
    records: BTreeMap<ProofId, ProofRecord>,
}

impl MemoryProofStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProofId, &ProofRecord)> {
        self.records.iter()
    }
}

impl ProofStore for MemoryProofStore {
    fn get(&self, proof_id: &ProofId) -> Option<ProofRecord> {
        self.records.get(proof_id).copied()
    }

    fn set(&mut self, proof_id: ProofId, record: ProofRecord) {
        self.records.insert(proof_id, record);
    }

    fn remove(&mut self, proof_id: &ProofId) -> Option<ProofRecord> {
        self.records.remove(proof_id)
    }
}
