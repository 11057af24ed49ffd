//! Proof records and the fixed-layout payloads that create and remove them.
//!
//! ## Enable payload
//!
//! ```text
//! | Field        | Offset | Size | Description              |
//! |--------------|--------|------|--------------------------|
//! | proof_id     | 0      | 32   | u256 big-endian          |
//! | model_id     | 32     | 16   | u128 big-endian          |
//! | version_id   | 48     | 16   | u128 big-endian          |
//! | user_address | 64     | 20   | bound user address       |
//! | proof_hash   | 84     | 32   | digest both parties sign |
//! ```
//!
//! Payloads shorter than [`ENABLE_PAYLOAD_MIN_LENGTH`] are rejected outright;
//! longer ones must still hold every field. Trailing bytes are ignored.
//!
//! ## Disable payload
//!
//! A single big-endian `proof_id` in the first 32 bytes.

use alloy_primitives::{Address, B256, U256};

use crate::error::MalformedInput;

/// Identifier of a proof record.
pub type ProofId = U256;

/// Bytes occupied by an encoded [`ProofId`].
pub const PROOF_ID_LENGTH: usize = 32;

/// Bytes occupied by an encoded [`ProofRecord`].
pub const RECORD_ENCODED_LENGTH: usize = 16 + 16 + 20 + 32;

/// Declared minimum for an enable payload.
pub const ENABLE_PAYLOAD_MIN_LENGTH: usize = 96;

/// Bytes actually read from an enable payload.
pub const ENABLE_PAYLOAD_LENGTH: usize = PROOF_ID_LENGTH + RECORD_ENCODED_LENGTH;

/// A stored association between a model/version, a user and a proof digest.
///
/// The all-zero value is what an absent or disabled id reads as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProofRecord {
    pub model_id: u128,
    pub version_id: u128,
    pub user_address: Address,
    pub proof_hash: B256,
}

impl ProofRecord {
    pub fn is_zeroed(&self) -> bool {
        *self == Self::default()
    }

    /// Decode the 84-byte record layout from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, MalformedInput> {
        let mut reader = ByteReader::new(bytes, "proof record");
        reader.read_record()
    }

    pub fn encode(&self) -> [u8; RECORD_ENCODED_LENGTH] {
        let mut out = [0u8; RECORD_ENCODED_LENGTH];
        out[..16].copy_from_slice(&self.model_id.to_be_bytes());
        out[16..32].copy_from_slice(&self.version_id.to_be_bytes());
        out[32..52].copy_from_slice(self.user_address.as_slice());
        out[52..].copy_from_slice(self.proof_hash.as_slice());
        out
    }
}

/// Decoded `enable` call data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnablePayload {
    pub proof_id: ProofId,
    pub record: ProofRecord,
}

impl EnablePayload {
    pub fn decode(data: &[u8]) -> Result<Self, MalformedInput> {
        if data.len() < ENABLE_PAYLOAD_MIN_LENGTH {
            return Err(MalformedInput::PayloadTooShort {
                payload: "enable",
                required: ENABLE_PAYLOAD_MIN_LENGTH,
                actual: data.len(),
            });
        }

        let mut reader = ByteReader::new(data, "enable");
        let proof_id = reader.read_u256()?;
        let record = reader.read_record()?;
        Ok(Self { proof_id, record })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENABLE_PAYLOAD_LENGTH);
        out.extend_from_slice(&self.proof_id.to_be_bytes::<PROOF_ID_LENGTH>());
        out.extend_from_slice(&self.record.encode());
        out
    }
}

/// Decoded `disable` call data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisablePayload {
    pub proof_id: ProofId,
}

impl DisablePayload {
    pub fn decode(data: &[u8]) -> Result<Self, MalformedInput> {
        let mut reader = ByteReader::new(data, "disable");
        Ok(Self {
            proof_id: reader.read_u256()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        self.proof_id.to_be_bytes::<PROOF_ID_LENGTH>().to_vec()
    }
}

/// Bounds-checked cursor over a fixed-layout payload.
struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
    payload: &'static str,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8], payload: &'static str) -> Self {
        Self {
            data,
            offset: 0,
            payload,
        }
    }

    fn read<const N: usize>(&mut self) -> Result<[u8; N], MalformedInput> {
        let end = self.offset.saturating_add(N);
        let chunk = self
            .data
            .get(self.offset..end)
            .ok_or(MalformedInput::PayloadTooShort {
                payload: self.payload,
                required: end,
                actual: self.data.len(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.offset = end;
        Ok(out)
    }

    fn read_u128(&mut self) -> Result<u128, MalformedInput> {
        self.read::<16>().map(u128::from_be_bytes)
    }

    fn read_u256(&mut self) -> Result<U256, MalformedInput> {
        self.read::<32>().map(U256::from_be_bytes)
    }

    fn read_address(&mut self) -> Result<Address, MalformedInput> {
        self.read::<20>().map(Address::from)
    }

    fn read_b256(&mut self) -> Result<B256, MalformedInput> {
        self.read::<32>().map(B256::from)
    }

    fn read_record(&mut self) -> Result<ProofRecord, MalformedInput> {
        Ok(ProofRecord {
            model_id: self.read_u128()?,
            version_id: self.read_u128()?,
            user_address: self.read_address()?,
            proof_hash: self.read_b256()?,
        })
    }
}
