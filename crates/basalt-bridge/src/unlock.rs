//! Target-side unlock (spec.md §4.11): given a lock inclusion proof and
//! enough guardian attestations, release the corresponding asset exactly
//! once. `UnlockRegistry` is the replay guard — a `lock_id` already in
//! `unlocked` can never be unlocked again, no matter how many fresh
//! attestations arrive for it.

use crate::errors::BridgeError;
use crate::lock::LockEvent;
use crate::ledger::verify_lock_inclusion;
use crate::multisig::{verify_multisig, Attestation, GuardianSet};
use basalt_trie::MerkleProof;
use basalt_types::Hash256;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Tracks which locks have already been unlocked on the target chain.
pub struct UnlockRegistry {
    unlocked: Mutex<HashSet<Hash256>>,
}

impl UnlockRegistry {
    pub fn new() -> Self {
        Self {
            unlocked: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_unlocked(&self, lock_id: &Hash256) -> bool {
        self.unlocked.lock().contains(lock_id)
    }

    /// Attempt to unlock `event` (identified by `lock_id`), given its
    /// inclusion `proof` against the guardians' attested `lock_root` and
    /// `attestations` over that same `(lock_id, lock_root)` pair.
    ///
    /// Checks replay first: a second call for an already-unlocked lock is
    /// rejected before any proof or signature work runs.
    pub fn unlock(
        &self,
        guardian_set: &GuardianSet,
        lock_id: &Hash256,
        lock_root: &Hash256,
        event: &LockEvent,
        proof: &MerkleProof,
        attestations: &[Attestation],
    ) -> Result<(), BridgeError> {
        let mut unlocked = self.unlocked.lock();
        if unlocked.contains(lock_id) {
            return Err(BridgeError::AlreadyUnlocked(*lock_id));
        }

        if !verify_lock_inclusion(proof, lock_id, event)? {
            return Err(BridgeError::UnknownLock(*lock_id));
        }
        verify_multisig(guardian_set, lock_id, lock_root, attestations)?;

        unlocked.insert(*lock_id);
        Ok(())
    }
}

impl Default for UnlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LockLedger;
    use crate::multisig::attestation_message;
    use basalt_crypto::ed25519::Keypair;
    use basalt_types::{Address, UInt256};
    use rand::rngs::OsRng;

    fn sample_event() -> LockEvent {
        LockEvent {
            depositor: Address([1u8; 20]),
            asset: Address([2u8; 20]),
            amount: UInt256::from_u64(100),
            recipient: vec![0x01],
            home_chain_id: 1,
            target_chain_id: 2,
            nonce: 1,
        }
    }

    fn setup() -> (Vec<Keypair>, GuardianSet, LockLedger, LockEvent, Hash256, Hash256) {
        let keypairs: Vec<Keypair> = (0..3).map(|_| Keypair::generate(&mut OsRng)).collect();
        let guardians = keypairs.iter().map(Keypair::public_key).collect();
        let set = GuardianSet::new(guardians, 2).unwrap();
        let mut ledger = LockLedger::new();
        let event = sample_event();
        let (lock_id, lock_root) = ledger.commit(&event).unwrap();
        (keypairs, set, ledger, event, lock_id, lock_root)
    }

    #[test]
    fn unlock_with_valid_proof_and_quorum_succeeds() {
        let (keypairs, set, ledger, event, lock_id, lock_root) = setup();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        let message = attestation_message(&lock_id, &lock_root);
        let attestations: Vec<Attestation> = keypairs[..2]
            .iter()
            .enumerate()
            .map(|(i, kp)| Attestation {
                signer_index: i as u8,
                signature: kp.sign(&message),
            })
            .collect();

        let registry = UnlockRegistry::new();
        assert!(registry
            .unlock(&set, &lock_id, &lock_root, &event, &proof, &attestations)
            .is_ok());
        assert!(registry.is_unlocked(&lock_id));
    }

    #[test]
    fn second_unlock_of_same_lock_is_rejected() {
        let (keypairs, set, ledger, event, lock_id, lock_root) = setup();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        let message = attestation_message(&lock_id, &lock_root);
        let attestations: Vec<Attestation> = keypairs[..2]
            .iter()
            .enumerate()
            .map(|(i, kp)| Attestation {
                signer_index: i as u8,
                signature: kp.sign(&message),
            })
            .collect();

        let registry = UnlockRegistry::new();
        registry
            .unlock(&set, &lock_id, &lock_root, &event, &proof, &attestations)
            .unwrap();
        assert!(matches!(
            registry.unlock(&set, &lock_id, &lock_root, &event, &proof, &attestations),
            Err(BridgeError::AlreadyUnlocked(_))
        ));
    }

    #[test]
    fn unlock_with_insufficient_attestations_fails_and_does_not_mark_unlocked() {
        let (keypairs, set, ledger, event, lock_id, lock_root) = setup();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        let message = attestation_message(&lock_id, &lock_root);
        let attestations = vec![Attestation {
            signer_index: 0,
            signature: keypairs[0].sign(&message),
        }];

        let registry = UnlockRegistry::new();
        assert!(registry
            .unlock(&set, &lock_id, &lock_root, &event, &proof, &attestations)
            .is_err());
        assert!(!registry.is_unlocked(&lock_id));
    }

    #[test]
    fn unlock_with_mismatched_event_is_rejected() {
        let (keypairs, set, ledger, event, lock_id, lock_root) = setup();
        let proof = ledger.prove(&lock_id).unwrap().unwrap();
        let message = attestation_message(&lock_id, &lock_root);
        let attestations: Vec<Attestation> = keypairs[..2]
            .iter()
            .enumerate()
            .map(|(i, kp)| Attestation {
                signer_index: i as u8,
                signature: kp.sign(&message),
            })
            .collect();

        let mut tampered = event.clone();
        tampered.amount = UInt256::from_u64(999_999);

        let registry = UnlockRegistry::new();
        assert!(matches!(
            registry.unlock(&set, &lock_id, &lock_root, &tampered, &proof, &attestations),
            Err(BridgeError::UnknownLock(_))
        ));
    }
}
