//! # basalt-crypto
//!
//! Hashing and signature primitives: BLAKE3 (one-shot + streaming,
//! plus EOA and contract address derivation), Keccak-256
//! (Ethereum-compatible address derivation only), Ed25519
//! (sign/verify/batch-verify/derive-address), and BLS12-381
//! (sign/verify/aggregate).

pub mod bls;
pub mod ed25519;
pub mod errors;
pub mod hash;

pub use errors::CryptoError;
pub use hash::{blake3_hash, derive_contract_address, keccak256, StreamingHasher};
