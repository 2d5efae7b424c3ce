//! AEAD envelope (spec.md §4.8): AES-256-GCM over a 96-bit nonce. Domain
//! logic only — no framing, no nonce bookkeeping; callers supply an
//! already-allocated, already-checked nonce (see `nonce.rs`).

use crate::errors::TransportError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

/// Encrypt `plaintext` under `key` with `nonce`, returning ciphertext with
/// the 16-byte authentication tag appended.
pub fn encrypt(key: &[u8; 32], nonce: &[u8; 12], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .expect("AES-256-GCM encryption over a bounded buffer cannot fail")
}

/// Decrypt `ciphertext` (with its trailing 16-byte tag) under `key` with
/// `nonce`. Using the wrong key, wrong nonce, or a tampered ciphertext all
/// surface as the same [`TransportError::DecryptionFailed`] — the AEAD
/// construction does not distinguish the failure mode, and neither should
/// callers.
pub fn decrypt(key: &[u8; 32], nonce: &[u8; 12], ciphertext: &[u8]) -> Result<Vec<u8>, TransportError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| TransportError::DecryptionFailed)
}
