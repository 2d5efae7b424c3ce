//! BLAKE3 and Keccak-256 hashing.
//!
//! BLAKE3 is Basalt's primary content-addressing hash (block hashes, trie
//! node hashes, transaction hashes). Keccak-256 exists solely for
//! Ethereum-compatible address derivation paths that need bit-exact
//! Keccak-256 (pad byte `0x01`), not the NIST SHA-3 finalization
//! (`0x06`) — `sha3::Keccak256` already implements the former.

use crate::errors::CryptoError;
use basalt_types::{Address, Hash256};
use sha3::{Digest, Keccak256};

/// One-shot BLAKE3 hash of `data`.
pub fn blake3_hash(data: &[u8]) -> Hash256 {
    Hash256(*blake3::hash(data).as_bytes())
}

/// Derive a deployed contract's address (spec.md §3): `low20(BLAKE3(sender ‖
/// nonce_LE64))`, where `nonce` is the deploying account's nonce at the time
/// of the `ContractDeploy` transaction.
pub fn derive_contract_address(sender: &Address, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(20 + 8);
    preimage.extend_from_slice(sender.as_bytes());
    preimage.extend_from_slice(&nonce.to_le_bytes());
    let hash = blake3_hash(&preimage);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.0[..20]);
    Address(bytes)
}

/// Keccak-256 (original Keccak padding, not SHA-3) of `data`.
pub fn keccak256(data: &[u8]) -> Hash256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash256(out)
}

/// Incremental BLAKE3 hasher.
///
/// Call `update` any number of times, then `finalize` exactly once.
/// `finalize` takes ownership of the inner state; any further `update` or
/// `finalize` call fails with [`CryptoError::HasherDisposed`] instead of
/// silently hashing nothing.
pub struct StreamingHasher {
    inner: Option<blake3::Hasher>,
}

impl StreamingHasher {
    /// Start a new streaming hash.
    pub fn new() -> Self {
        Self {
            inner: Some(blake3::Hasher::new()),
        }
    }

    /// Feed more bytes into the hash.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        let hasher = self.inner.as_mut().ok_or(CryptoError::HasherDisposed)?;
        hasher.update(data);
        Ok(())
    }

    /// Consume the hasher and return the final digest.
    pub fn finalize(&mut self) -> Result<Hash256, CryptoError> {
        let hasher = self.inner.take().ok_or(CryptoError::HasherDisposed)?;
        Ok(Hash256(*hasher.finalize().as_bytes()))
    }
}

impl Default for StreamingHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario 1 from spec.md §8: BLAKE3 of the empty input.
    #[test]
    fn blake3_empty_known_answer() {
        let h = blake3_hash(&[]);
        assert_eq!(
            h.to_hex(),
            "0xaf1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    /// Scenario 2 from spec.md §8: Keccak-256("abc").
    #[test]
    fn keccak256_abc_known_answer() {
        let h = keccak256(b"abc");
        assert_eq!(
            h.to_hex(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn keccak256_empty_known_answer() {
        let h = keccak256(b"");
        assert_eq!(
            h.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    /// The 56-byte NIST reference string from spec.md §4.2's KAT coverage list.
    #[test]
    fn keccak256_56_byte_reference_string() {
        let input = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(input.len(), 56);
        let h = keccak256(input);
        assert_eq!(
            h.to_hex(),
            "0x45d3b367a6904e6e8d502ee04999a7c27647f91fa845d456525fd352ae3d7371"
        );
    }

    #[test]
    fn keccak256_zero_block_known_answer() {
        let zeros = [0u8; 32];
        let h = keccak256(&zeros);
        assert_eq!(
            h.to_hex(),
            "0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
        assert_ne!(h, keccak256(&[1u8; 32]));
    }

    /// Scenario 3 from spec.md §8: the deploying sender is 20 zero bytes
    /// and its nonce is `0`.
    #[test]
    fn contract_address_known_answer() {
        let sender = Address([0u8; 20]);
        let address = derive_contract_address(&sender, 0);
        let mut preimage = [0u8; 28];
        preimage[..20].copy_from_slice(sender.as_bytes());
        let expected = blake3_hash(&preimage);
        assert_eq!(address.as_bytes(), &expected.0[..20]);
    }

    #[test]
    fn contract_address_is_sensitive_to_nonce() {
        let sender = Address([7u8; 20]);
        let a = derive_contract_address(&sender, 0);
        let b = derive_contract_address(&sender, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn contract_address_is_sensitive_to_sender() {
        let a = derive_contract_address(&Address([1u8; 20]), 5);
        let b = derive_contract_address(&Address([2u8; 20]), 5);
        assert_ne!(a, b);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut streaming = StreamingHasher::new();
        streaming.update(b"hello ").unwrap();
        streaming.update(b"world").unwrap();
        let digest = streaming.finalize().unwrap();
        assert_eq!(digest, blake3_hash(b"hello world"));
    }

    #[test]
    fn streaming_fails_loudly_after_finalize() {
        let mut streaming = StreamingHasher::new();
        streaming.update(b"x").unwrap();
        streaming.finalize().unwrap();
        assert_eq!(streaming.update(b"y"), Err(CryptoError::HasherDisposed));
        assert_eq!(streaming.finalize(), Err(CryptoError::HasherDisposed));
    }
}
