//! Lock events (spec.md §4.11): the home-chain side of the bridge locks an
//! asset and records a [`LockEvent`] whose identity (`lock_id`) is a
//! domain-separated content hash, mirroring how [`basalt_chain::Transaction`]
//! derives its own hash — the domain tag keeps a lock id from colliding
//! with a hash computed the same way for an unrelated purpose.

use basalt_codec::{CodecError, Reader, Writer};
use basalt_crypto::blake3_hash;
use basalt_types::{Address, Hash256, UInt256};

/// Domain separator for [`LockEvent::lock_id`]; distinguishes a lock id
/// from any other BLAKE3 hash computed over similarly-shaped bytes.
pub const LOCK_DOMAIN_TAG: &[u8] = b"BASALT_BRIDGE_LOCK_V1";

/// One asset deposit locked on the home chain, awaiting unlock on the
/// target chain. Unidirectional: there is no matching "unlock event"
/// struct for the return leg, since the bridge core does not model one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockEvent {
    pub depositor: Address,
    pub asset: Address,
    pub amount: UInt256,
    pub recipient: Vec<u8>,
    pub home_chain_id: u32,
    pub target_chain_id: u32,
    pub nonce: u64,
}

impl LockEvent {
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Writer::new();
        w.write_raw(self.depositor.as_bytes());
        w.write_raw(self.asset.as_bytes());
        w.write_raw(&self.amount.to_be_bytes());
        w.write_bytes(&self.recipient)?;
        w.write_u32_le(self.home_chain_id);
        w.write_u32_le(self.target_chain_id);
        w.write_u64_le(self.nonce);
        Ok(w.into_vec())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(bytes);
        Ok(Self {
            depositor: Address(r.read_fixed::<20>()?),
            asset: Address(r.read_fixed::<20>()?),
            amount: UInt256::from_be_bytes(&r.read_fixed::<32>()?),
            recipient: r.read_bytes()?,
            home_chain_id: r.read_u32_le()?,
            target_chain_id: r.read_u32_le()?,
            nonce: r.read_u64_le()?,
        })
    }

    /// `BLAKE3(LOCK_DOMAIN_TAG ‖ encode())` — this lock's identity, and the
    /// key it is committed into the lock ledger under.
    pub fn lock_id(&self) -> Result<Hash256, CodecError> {
        let encoded = self.encode()?;
        let mut preimage = Vec::with_capacity(LOCK_DOMAIN_TAG.len() + encoded.len());
        preimage.extend_from_slice(LOCK_DOMAIN_TAG);
        preimage.extend_from_slice(&encoded);
        Ok(blake3_hash(&preimage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LockEvent {
        LockEvent {
            depositor: Address([1u8; 20]),
            asset: Address([2u8; 20]),
            amount: UInt256::from_u64(5_000),
            recipient: vec![0xAA, 0xBB, 0xCC],
            home_chain_id: 1,
            target_chain_id: 2,
            nonce: 7,
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let event = sample();
        let encoded = event.encode().unwrap();
        let decoded = LockEvent::decode(&encoded).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn lock_id_is_deterministic() {
        let a = sample();
        let b = sample();
        assert_eq!(a.lock_id().unwrap(), b.lock_id().unwrap());
    }

    #[test]
    fn lock_id_is_sensitive_to_every_field() {
        let base = sample();
        let mut changed = sample();
        changed.nonce += 1;
        assert_ne!(base.lock_id().unwrap(), changed.lock_id().unwrap());
    }

    #[test]
    fn lock_id_is_domain_separated_from_raw_encoding_hash() {
        let event = sample();
        let raw_hash = blake3_hash(&event.encode().unwrap());
        assert_ne!(event.lock_id().unwrap(), raw_hash);
    }
}
