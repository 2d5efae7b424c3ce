//! The lock ledger: a [`basalt_trie::MerkleTrie`] committing every lock
//! event by its `lock_id`, so a relayer can carry a compact inclusion proof
//! of one lock to the target chain instead of the whole ledger. This trie
//! is independent of the account-state trie — its root is never compared
//! against a block's `state_root`.

use crate::errors::BridgeError;
use crate::lock::LockEvent;
use basalt_trie::{generate_proof_from_trie, verify_proof, MemoryNodeStore, MerkleProof, MerkleTrie};
use basalt_types::Hash256;

/// Append-only ledger of lock events, keyed by `lock_id`.
pub struct LockLedger {
    trie: MerkleTrie<MemoryNodeStore>,
}

impl LockLedger {
    pub fn new() -> Self {
        Self {
            trie: MerkleTrie::new(MemoryNodeStore::new()),
        }
    }

    /// Current lock root — the commitment a guardian attestation signs over.
    pub fn root(&self) -> Option<Hash256> {
        self.trie.root()
    }

    /// Commit `event` into the ledger, returning its id and the new root.
    pub fn commit(&mut self, event: &LockEvent) -> Result<(Hash256, Hash256), BridgeError> {
        let lock_id = event.lock_id()?;
        let root = self.trie.put(lock_id.as_bytes(), event.encode()?)?;
        Ok((lock_id, root))
    }

    /// An inclusion proof of `lock_id` against the current root.
    pub fn prove(&self, lock_id: &Hash256) -> Result<Option<MerkleProof>, BridgeError> {
        Ok(generate_proof_from_trie(&self.trie, lock_id.as_bytes())?)
    }
}

impl Default for LockLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Verify that `proof` really shows `event` committed under `lock_id` at
/// `proof.root` — used on the target chain, which never sees the ledger
/// itself, only a proof carried by a relayer.
pub fn verify_lock_inclusion(proof: &MerkleProof, lock_id: &Hash256, event: &LockEvent) -> Result<bool, BridgeError> {
    if proof.key != lock_id.as_bytes() {
        return Ok(false);
    }
    if proof.value.as_deref() != Some(event.encode()?.as_slice()) {
        return Ok(false);
    }
    Ok(verify_proof(proof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_types::{Address, UInt256};

    fn sample(nonce: u64) -> LockEvent {
        LockEvent {
            depositor: Address([1u8; 20]),
            asset: Address([2u8; 20]),
            amount: UInt256::from_u64(1_000),
            recipient: vec![0x01, 0x02],
            home_chain_id: 1,
            target_chain_id: 9,
            nonce,
        }
    }

    #[test]
    fn commit_then_prove_verifies() {
        let mut ledger = LockLedger::new();
        let event = sample(1);
        let (lock_id, root) = ledger.commit(&event).unwrap();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        assert_eq!(proof.root, root);
        assert!(verify_lock_inclusion(&proof, &lock_id, &event).unwrap());
    }

    #[test]
    fn proof_for_wrong_event_fails() {
        let mut ledger = LockLedger::new();
        let event = sample(1);
        let (lock_id, _) = ledger.commit(&event).unwrap();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        let other = sample(2);
        assert!(!verify_lock_inclusion(&proof, &lock_id, &other).unwrap());
    }

    #[test]
    fn multiple_locks_are_each_individually_provable() {
        let mut ledger = LockLedger::new();
        let a = sample(1);
        let b = sample(2);
        let (id_a, _) = ledger.commit(&a).unwrap();
        let (id_b, root) = ledger.commit(&b).unwrap();

        let proof_a = ledger.prove(&id_a).unwrap().unwrap();
        let proof_b = ledger.prove(&id_b).unwrap().unwrap();
        assert_eq!(proof_a.root, root);
        assert_eq!(proof_b.root, root);
        assert!(verify_lock_inclusion(&proof_a, &id_a, &a).unwrap());
        assert!(verify_lock_inclusion(&proof_b, &id_b, &b).unwrap());
    }
}
