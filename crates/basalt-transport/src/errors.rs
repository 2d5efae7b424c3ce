//! Transport failure modes (spec.md §4.8).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// A frame's declared length was zero or exceeded the 16 MiB cap.
    #[error("frame length {declared} out of bounds (max {max})")]
    FrameTooLarge { declared: u32, max: u32 },

    /// A send-side message was larger than the framing cap can carry.
    #[error("message too large to send: {len} bytes")]
    MessageTooLarge { len: usize },

    /// The peer's X25519 ephemeral key signature did not verify under its
    /// claimed Ed25519 identity key.
    #[error("handshake signature verification failed")]
    HandshakeSignatureInvalid,

    /// The peer rejected our `HELLO` (wrong genesis, chain id, or protocol
    /// version).
    #[error("handshake rejected by peer: {reason}")]
    HandshakeRejected { reason: String },

    /// Our own genesis/chain-id/protocol-version check rejected the peer.
    #[error("incompatible peer: {reason}")]
    IncompatiblePeer { reason: String },

    /// AEAD decryption failed — wrong key, corrupted ciphertext, or a tag
    /// mismatch.
    #[error("AEAD decryption failed")]
    DecryptionFailed,

    /// A nonce at or below the highest one already seen for this
    /// direction — a replay or an out-of-order delivery.
    #[error("replayed or out-of-order nonce {nonce} (last seen {last_seen})")]
    Replay { nonce: u128, last_seen: u128 },

    /// The per-direction 96-bit nonce counter would wrap around.
    #[error("nonce counter exhausted")]
    NonceExhausted,

    #[error(transparent)]
    Codec(#[from] basalt_codec::CodecError),

    #[error("connection closed")]
    ConnectionClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
