//! Ed25519 signing, verification, batch verification, and address derivation.

use crate::errors::CryptoError;
use crate::hash::blake3_hash;
use basalt_types::{Address, PublicKey, Signature};
use ed25519_dalek::{Signer, Verifier};
use rand_core::{CryptoRng, RngCore};

/// An Ed25519 signing keypair.
pub struct Keypair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(rng),
        }
    }

    /// Construct from a 32-byte seed (the Ed25519 private scalar seed).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public key corresponding to this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign `msg`.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature(self.signing_key.sign(msg).to_bytes())
    }
}

/// Sign `msg` with `signing_key` (raw 32-byte seed).
pub fn sign(signing_key_seed: &[u8; 32], msg: &[u8]) -> Signature {
    Keypair::from_seed(signing_key_seed).sign(msg)
}

/// Verify `sig` over `msg` under `pk`.
pub fn verify(pk: &PublicKey, msg: &[u8], sig: &Signature) -> Result<(), CryptoError> {
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&pk.0)
        .map_err(|_| CryptoError::InvalidLength { expected: 32, actual: pk.0.len() })?;
    let signature = ed25519_dalek::Signature::from_bytes(&sig.0);
    verifying_key
        .verify(msg, &signature)
        .map_err(|_| CryptoError::VerifyFailed)
}

/// `true`/`false` convenience wrapper over [`verify`].
pub fn verify_bool(pk: &PublicKey, msg: &[u8], sig: &Signature) -> bool {
    verify(pk, msg, sig).is_ok()
}

/// Batch-verify `n` independent `(pk, msg, sig)` triples.
///
/// Returns `Ok(true)` only if every signature verifies; a single invalid
/// signature fails the whole batch (callers needing to know *which* one
/// failed should fall back to individual `verify` calls).
pub fn batch_verify(pks: &[PublicKey], msgs: &[&[u8]], sigs: &[Signature]) -> Result<bool, CryptoError> {
    if pks.len() != msgs.len() || pks.len() != sigs.len() {
        return Err(CryptoError::BatchLengthMismatch {
            pks: pks.len(),
            msgs: msgs.len(),
            sigs: sigs.len(),
        });
    }
    for ((pk, msg), sig) in pks.iter().zip(msgs.iter()).zip(sigs.iter()) {
        if verify(pk, msg, sig).is_err() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Derive the low-20-byte address of an Ed25519 public key: `low20(BLAKE3(pk))`.
pub fn derive_address(pk: &PublicKey) -> Address {
    let hash = blake3_hash(&pk.0);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.0[..20]);
    Address(bytes)
}
