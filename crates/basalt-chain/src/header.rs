//! `Header` wire layout (spec.md §6): a 220-byte fixed prefix followed by
//! length-prefixed `extra_data`. A block's own hash is
//! `BLAKE3(serialized header)`.

use crate::errors::ChainError;
use basalt_codec::{Reader, Writer};
use basalt_types::{Address, Hash256, UInt256};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub number: u64,
    pub parent_hash: Hash256,
    pub state_root: Hash256,
    pub transactions_root: Hash256,
    pub receipts_root: Hash256,
    pub timestamp: i64,
    pub proposer: Address,
    pub chain_id: u32,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub base_fee: UInt256,
    pub protocol_version: u32,
    pub extra_data: Vec<u8>,
}

impl Header {
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        let mut w = Writer::new();
        w.write_u64_le(self.number);
        w.write_raw(self.parent_hash.as_bytes());
        w.write_raw(self.state_root.as_bytes());
        w.write_raw(self.transactions_root.as_bytes());
        w.write_raw(self.receipts_root.as_bytes());
        w.write_i64_le(self.timestamp);
        w.write_raw(self.proposer.as_bytes());
        w.write_u32_le(self.chain_id);
        w.write_u64_le(self.gas_used);
        w.write_u64_le(self.gas_limit);
        w.write_raw(&self.base_fee.to_be_bytes());
        w.write_u32_le(self.protocol_version);
        w.write_bytes(&self.extra_data)?;
        Ok(w.into_vec())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChainError> {
        let mut r = Reader::new(bytes);
        Ok(Self {
            number: r.read_u64_le()?,
            parent_hash: Hash256(r.read_fixed::<32>()?),
            state_root: Hash256(r.read_fixed::<32>()?),
            transactions_root: Hash256(r.read_fixed::<32>()?),
            receipts_root: Hash256(r.read_fixed::<32>()?),
            timestamp: r.read_i64_le()?,
            proposer: Address(r.read_fixed::<20>()?),
            chain_id: r.read_u32_le()?,
            gas_used: r.read_u64_le()?,
            gas_limit: r.read_u64_le()?,
            base_fee: UInt256::from_be_bytes(&r.read_fixed::<32>()?),
            protocol_version: r.read_u32_le()?,
            extra_data: r.read_bytes()?,
        })
    }

    /// `BLAKE3(serialized header)` — this block's identity.
    pub fn hash(&self) -> Result<Hash256, ChainError> {
        Ok(basalt_crypto::blake3_hash(&self.encode()?))
    }
}
