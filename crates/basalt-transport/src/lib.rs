//! Length-framed, mutually-authenticated, encrypted transport (spec.md
//! §4.8): a 4-byte big-endian length prefix, an Ed25519-identity-bound
//! X25519 handshake, and an AES-256-GCM channel with per-direction
//! monotonic nonces.

pub mod adapters;
pub mod domain;
mod errors;

pub use adapters::{handshake, read_frame, write_frame, SecureChannel};
pub use domain::{
    check_frame_len, decrypt, derive_directional_keys, encode_frame, encrypt, verify_hello,
    BestHead, ChainContext, DirectionalKeys, Hello, HelloAck, NonceCounter, NonceTracker,
    RejectReason, MAX_FRAME_LEN,
};
pub use errors::TransportError;
