//! Guardian multisig attestation (spec.md §4.11): `m`-of-`n` guardians sign
//! off on a lock before the target chain will unlock. Guardians attest to
//! a commitment over `(lock_id, lock_root)` rather than the raw lock event,
//! so a single attestation vouches for the event being rooted in a ledger
//! the guardian actually observed, not just that the bytes look right.

use crate::errors::BridgeError;
use basalt_crypto::ed25519;
use basalt_types::{Hash256, PublicKey, Signature};
use std::collections::HashSet;

/// Domain separator for the unlock attestation message, distinct from
/// [`crate::lock::LOCK_DOMAIN_TAG`] so a lock id can never be replayed as
/// an attestation message or vice versa.
pub const UNLOCK_DOMAIN_TAG: &[u8] = b"BASALT_BRIDGE_UNLOCK_V1";

/// The fixed set of guardians authorized to attest unlocks, and how many
/// of them must agree.
#[derive(Clone, Debug)]
pub struct GuardianSet {
    pub guardians: Vec<PublicKey>,
    pub threshold: usize,
}

impl GuardianSet {
    pub fn new(guardians: Vec<PublicKey>, threshold: usize) -> Result<Self, BridgeError> {
        if threshold == 0 || threshold > guardians.len() {
            return Err(BridgeError::InvalidThreshold {
                threshold,
                guardians: guardians.len(),
            });
        }
        Ok(Self { guardians, threshold })
    }

    fn public_key_at(&self, index: u8) -> Option<&PublicKey> {
        self.guardians.get(index as usize)
    }
}

/// One guardian's signature over an unlock attestation message.
#[derive(Clone, Debug)]
pub struct Attestation {
    pub signer_index: u8,
    pub signature: Signature,
}

/// The message guardians sign: `UNLOCK_DOMAIN_TAG ‖ lock_id ‖ lock_root`.
pub fn attestation_message(lock_id: &Hash256, lock_root: &Hash256) -> Vec<u8> {
    let mut msg = Vec::with_capacity(UNLOCK_DOMAIN_TAG.len() + 64);
    msg.extend_from_slice(UNLOCK_DOMAIN_TAG);
    msg.extend_from_slice(lock_id.as_bytes());
    msg.extend_from_slice(lock_root.as_bytes());
    msg
}

/// Verify that `attestations` carry at least `guardian_set.threshold`
/// distinct, valid guardian signatures over `(lock_id, lock_root)`.
///
/// Rejects outright (rather than merely discounting) a duplicate signer
/// index or an index outside the guardian set — either indicates a
/// malformed or adversarial attestation bundle, not merely a short one.
pub fn verify_multisig(
    guardian_set: &GuardianSet,
    lock_id: &Hash256,
    lock_root: &Hash256,
    attestations: &[Attestation],
) -> Result<(), BridgeError> {
    let message = attestation_message(lock_id, lock_root);
    let mut seen = HashSet::new();
    let mut valid = 0usize;

    for attestation in attestations {
        if !seen.insert(attestation.signer_index) {
            return Err(BridgeError::DuplicateSigner(attestation.signer_index));
        }
        let pk = guardian_set
            .public_key_at(attestation.signer_index)
            .ok_or(BridgeError::InvalidSignerIndex(attestation.signer_index))?;
        if ed25519::verify_bool(pk, &message, &attestation.signature) {
            valid += 1;
        }
    }

    if valid < guardian_set.threshold {
        return Err(BridgeError::InsufficientAttestations {
            have: valid,
            need: guardian_set.threshold,
        });
    }
    Ok(())
}
