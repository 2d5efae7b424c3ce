//! BLS12-381 signing, verification, and signature aggregation.
//!
//! Public keys live in G1 (48 bytes), signatures in G2 (96 bytes), matching
//! spec.md §4.2. Deterministic key generation and hash-to-curve follow the
//! RFC-9380-style ciphersuite `blst`'s `min_pk` module implements.

use crate::errors::CryptoError;
use basalt_types::{BlsPublicKey, BlsSignature};
use blst::min_pk::{AggregatePublicKey, AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

/// Domain separation tag for Basalt's BLS12-381 signatures.
const DST: &[u8] = b"BASALT-V1-CS-BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

fn map_blst_err(err: BLST_ERROR) -> CryptoError {
    CryptoError::Bls(format!("{:?}", err))
}

/// A BLS12-381 signing keypair.
pub struct BlsKeypair {
    secret_key: SecretKey,
}

impl BlsKeypair {
    /// Deterministically derive a keypair from ≥32 bytes of key material.
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, CryptoError> {
        if ikm.len() < 32 {
            return Err(CryptoError::InvalidLength {
                expected: 32,
                actual: ikm.len(),
            });
        }
        let secret_key = SecretKey::key_gen(ikm, &[]).map_err(map_blst_err)?;
        Ok(Self { secret_key })
    }

    /// The public key (G1, 48 bytes) for this keypair.
    pub fn public_key(&self) -> BlsPublicKey {
        let bytes = self.secret_key.sk_to_pk().compress();
        BlsPublicKey(bytes)
    }

    /// Sign `msg`, producing a G2 signature (96 bytes).
    pub fn sign(&self, msg: &[u8]) -> BlsSignature {
        let sig = self.secret_key.sign(msg, DST, &[]);
        BlsSignature(sig.compress())
    }
}

/// Verify a single BLS signature over `msg` under `pk`.
pub fn verify(pk: &BlsPublicKey, msg: &[u8], sig: &BlsSignature) -> Result<(), CryptoError> {
    let public_key = PublicKey::from_bytes(&pk.0).map_err(map_blst_err)?;
    let signature = Signature::from_bytes(&sig.0).map_err(map_blst_err)?;
    match signature.verify(true, msg, DST, &[], &public_key, true) {
        BLST_ERROR::BLST_SUCCESS => Ok(()),
        _ => Err(CryptoError::VerifyFailed),
    }
}

/// Aggregate `n` signatures (each possibly over a different message) into
/// one constant-size signature.
pub fn aggregate_signatures(sigs: &[BlsSignature]) -> Result<BlsSignature, CryptoError> {
    if sigs.is_empty() {
        return Err(CryptoError::InvalidLength {
            expected: 1,
            actual: 0,
        });
    }
    let parsed: Result<Vec<Signature>, _> = sigs.iter().map(|s| Signature::from_bytes(&s.0)).collect();
    let parsed = parsed.map_err(map_blst_err)?;
    let refs: Vec<&Signature> = parsed.iter().collect();
    let aggregate = AggregateSignature::aggregate(&refs, true).map_err(map_blst_err)?;
    Ok(BlsSignature(aggregate.to_signature().compress()))
}

/// Verify an aggregate signature against `n` (possibly distinct) public
/// keys each signing the *same* message `msg`.
pub fn verify_aggregate(
    pks: &[BlsPublicKey],
    msg: &[u8],
    aggregate_sig: &BlsSignature,
) -> Result<(), CryptoError> {
    if pks.is_empty() {
        return Err(CryptoError::InvalidLength {
            expected: 1,
            actual: 0,
        });
    }
    let parsed: Result<Vec<PublicKey>, _> = pks.iter().map(|p| PublicKey::from_bytes(&p.0)).collect();
    let parsed = parsed.map_err(map_blst_err)?;
    let refs: Vec<&PublicKey> = parsed.iter().collect();
    let aggregate_pk = AggregatePublicKey::aggregate(&refs, true).map_err(map_blst_err)?;
    let public_key = aggregate_pk.to_public_key();
    let signature = Signature::from_bytes(&aggregate_sig.0).map_err(map_blst_err)?;
    match signature.verify(true, msg, DST, &[], &public_key, true) {
        BLST_ERROR::BLST_SUCCESS => Ok(()),
        _ => Err(CryptoError::VerifyFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ikm(seed: u8) -> [u8; 32] {
        [seed; 32]
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let kp = BlsKeypair::from_ikm(&ikm(1)).unwrap();
        let msg = b"basalt validator vote";
        let sig = kp.sign(msg);
        assert!(verify(&kp.public_key(), msg, &sig).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let kp = BlsKeypair::from_ikm(&ikm(2)).unwrap();
        let sig = kp.sign(b"vote for block 1");
        assert!(verify(&kp.public_key(), b"vote for block 2", &sig).is_err());
    }

    #[test]
    fn deterministic_key_generation() {
        let kp1 = BlsKeypair::from_ikm(&ikm(3)).unwrap();
        let kp2 = BlsKeypair::from_ikm(&ikm(3)).unwrap();
        assert_eq!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn aggregate_and_verify_same_message() {
        let kp1 = BlsKeypair::from_ikm(&ikm(4)).unwrap();
        let kp2 = BlsKeypair::from_ikm(&ikm(5)).unwrap();
        let kp3 = BlsKeypair::from_ikm(&ikm(6)).unwrap();
        let msg = b"finalize checkpoint 42";
        let sigs = vec![kp1.sign(msg), kp2.sign(msg), kp3.sign(msg)];
        let aggregate = aggregate_signatures(&sigs).unwrap();
        let pks = vec![kp1.public_key(), kp2.public_key(), kp3.public_key()];
        assert!(verify_aggregate(&pks, msg, &aggregate).is_ok());
    }

    #[test]
    fn aggregate_verify_fails_with_missing_signer() {
        let kp1 = BlsKeypair::from_ikm(&ikm(7)).unwrap();
        let kp2 = BlsKeypair::from_ikm(&ikm(8)).unwrap();
        let msg = b"finalize checkpoint 43";
        let sigs = vec![kp1.sign(msg), kp2.sign(msg)];
        let aggregate = aggregate_signatures(&sigs).unwrap();
        // Verifying against only one of the two signers' keys must fail.
        assert!(verify_aggregate(&[kp1.public_key()], msg, &aggregate).is_err());
    }
}
