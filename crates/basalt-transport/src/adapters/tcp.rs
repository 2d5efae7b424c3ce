//! The actual socket I/O: framing, handshake exchange, and the resulting
//! encrypted channel, all driven over any `AsyncRead + AsyncWrite` stream
//! (a real `TcpStream` in production, an in-memory duplex in tests).

use crate::domain::{
    check_frame_len, decrypt, derive_directional_keys, encode_frame, encrypt, verify_hello,
    BestHead, ChainContext, Hello, HelloAck, NonceCounter, NonceTracker, RejectReason,
};
use crate::errors::TransportError;
use basalt_crypto::ed25519::Keypair;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey};

/// Read one length-prefixed frame from `stream`.
pub async fn read_frame<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Vec<u8>, TransportError> {
    let mut len_bytes = [0u8; 4];
    stream.read_exact(&mut len_bytes).await?;
    let len = u32::from_be_bytes(len_bytes);
    check_frame_len(len)?;
    let mut payload = vec![0u8; len as usize];
    stream.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Write one length-prefixed frame to `stream`.
pub async fn write_frame<S: AsyncWrite + Unpin>(stream: &mut S, payload: &[u8]) -> Result<(), TransportError> {
    let framed = encode_frame(payload)?;
    stream.write_all(&framed).await?;
    Ok(())
}

/// Run the `HELLO`/`HELLO_ACK` exchange over `stream`, returning a secure
/// channel on success. Symmetric: both sides send their `Hello`
/// immediately, then each reads the peer's before replying with an
/// accept/reject `HelloAck`.
pub async fn handshake<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut S,
    identity: &Keypair,
    chain_ctx: &ChainContext,
    best_head: BestHead,
) -> Result<SecureChannel, TransportError> {
    let ephemeral_secret = EphemeralSecret::random_from_rng(rand::rngs::OsRng);
    let ephemeral_public = X25519PublicKey::from(&ephemeral_secret);
    let ephemeral_bytes = *ephemeral_public.as_bytes();

    let hello = Hello {
        ed25519_pk: identity.public_key(),
        x25519_pk: ephemeral_bytes,
        signature: identity.sign(&ephemeral_bytes),
        genesis_hash: chain_ctx.genesis_hash,
        chain_id: chain_ctx.chain_id,
        protocol_version: chain_ctx.protocol_version,
        best_head,
    };
    write_frame(stream, &hello.encode()).await?;

    let peer_hello_bytes = read_frame(stream).await?;
    let peer_hello = Hello::decode(&peer_hello_bytes)?;
    let verdict = verify_hello(&peer_hello, chain_ctx);

    let our_ack = match &verdict {
        Ok(()) => HelloAck::Accepted,
        Err(reason) => HelloAck::Rejected(*reason),
    };
    write_frame(stream, &our_ack.encode()).await?;

    let peer_ack_bytes = read_frame(stream).await?;
    let peer_ack = HelloAck::decode(&peer_ack_bytes)?;

    verdict.map_err(|reason: RejectReason| TransportError::IncompatiblePeer {
        reason: format!("{reason:?}"),
    })?;
    if let HelloAck::Rejected(reason) = peer_ack {
        return Err(TransportError::HandshakeRejected {
            reason: format!("{reason:?}"),
        });
    }

    let shared_secret = ephemeral_secret.diffie_hellman(&X25519PublicKey::from(peer_hello.x25519_pk));
    let keys = derive_directional_keys(shared_secret.as_bytes());

    // Identity byte comparison picks a consistent initiator/responder
    // role for key assignment without a separate negotiation round —
    // both sides compute the same ordering independently.
    let we_are_initiator = identity.public_key().as_bytes() < peer_hello.ed25519_pk.as_bytes();
    let (encrypt_key, decrypt_key) = if we_are_initiator {
        (keys.initiator_to_responder, keys.responder_to_initiator)
    } else {
        (keys.responder_to_initiator, keys.initiator_to_responder)
    };

    Ok(SecureChannel {
        encrypt_key,
        decrypt_key,
        send_nonce: NonceCounter::new(),
        recv_nonce: NonceTracker::new(),
    })
}

/// The per-direction key material and nonce state for one established
/// connection. Keys are zeroized when this drops (via `DirectionalKeys`'s
/// own `Drop`, mirrored here since the keys are copied out of it).
pub struct SecureChannel {
    encrypt_key: [u8; 32],
    decrypt_key: [u8; 32],
    send_nonce: NonceCounter,
    recv_nonce: NonceTracker,
}

impl Drop for SecureChannel {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.encrypt_key.zeroize();
        self.decrypt_key.zeroize();
    }
}

impl SecureChannel {
    /// Encrypt and frame `plaintext`, writing it to `stream` as
    /// `12B nonce ‖ ciphertext ‖ 16B tag`.
    pub async fn send<S: AsyncWrite + Unpin>(&mut self, stream: &mut S, plaintext: &[u8]) -> Result<(), TransportError> {
        let nonce = self.send_nonce.next()?;
        let ciphertext = encrypt(&self.encrypt_key, &nonce, plaintext);
        let mut envelope = Vec::with_capacity(12 + ciphertext.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        write_frame(stream, &envelope).await
    }

    /// Read one frame from `stream`, split its nonce, check it against the
    /// strict-monotonic tracker, and decrypt.
    pub async fn recv<S: AsyncRead + Unpin>(&mut self, stream: &mut S) -> Result<Vec<u8>, TransportError> {
        let envelope = read_frame(stream).await?;
        if envelope.len() < 12 {
            return Err(TransportError::DecryptionFailed);
        }
        let mut nonce = [0u8; 12];
        nonce.copy_from_slice(&envelope[..12]);
        self.recv_nonce.check_and_advance(&nonce)?;
        decrypt(&self.decrypt_key, &nonce, &envelope[12..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BestHead;
    use basalt_types::Hash256;
    use rand::rngs::OsRng;

    fn chain_ctx() -> ChainContext {
        ChainContext {
            genesis_hash: Hash256([1u8; 32]),
            chain_id: 7,
            protocol_version: 1,
        }
    }

    fn head() -> BestHead {
        BestHead { number: 0, hash: Hash256::ZERO }
    }

    #[tokio::test]
    async fn handshake_and_roundtrip_over_duplex() {
        let (mut a, mut b) = tokio::io::duplex(64 * 1024);
        let identity_a = Keypair::generate(&mut OsRng);
        let identity_b = Keypair::generate(&mut OsRng);
        let ctx = chain_ctx();

        let (channel_a, channel_b) = tokio::join!(
            handshake(&mut a, &identity_a, &ctx, head()),
            handshake(&mut b, &identity_b, &ctx, head()),
        );
        let mut channel_a = channel_a.unwrap();
        let mut channel_b = channel_b.unwrap();

        channel_a.send(&mut a, b"ping").await.unwrap();
        let received = channel_b.recv(&mut b).await.unwrap();
        assert_eq!(received, b"ping");
    }

    #[tokio::test]
    async fn mismatched_genesis_is_rejected_on_both_sides() {
        let (mut a, mut b) = tokio::io::duplex(64 * 1024);
        let identity_a = Keypair::generate(&mut OsRng);
        let identity_b = Keypair::generate(&mut OsRng);
        let ctx_a = chain_ctx();
        let mut ctx_b = chain_ctx();
        ctx_b.genesis_hash = Hash256([2u8; 32]);

        let (result_a, result_b) = tokio::join!(
            handshake(&mut a, &identity_a, &ctx_a, head()),
            handshake(&mut b, &identity_b, &ctx_b, head()),
        );
        assert!(result_a.is_err());
        assert!(result_b.is_err());
    }

    #[tokio::test]
    async fn replayed_frame_is_rejected_by_receiver() {
        let (mut a, mut b) = tokio::io::duplex(64 * 1024);
        let identity_a = Keypair::generate(&mut OsRng);
        let identity_b = Keypair::generate(&mut OsRng);
        let ctx = chain_ctx();

        let (channel_a, channel_b) = tokio::join!(
            handshake(&mut a, &identity_a, &ctx, head()),
            handshake(&mut b, &identity_b, &ctx, head()),
        );
        let mut channel_a = channel_a.unwrap();
        let mut channel_b = channel_b.unwrap();

        channel_a.send(&mut a, b"one").await.unwrap();
        channel_a.send(&mut a, b"two").await.unwrap();
        assert_eq!(channel_b.recv(&mut b).await.unwrap(), b"one");
        assert_eq!(channel_b.recv(&mut b).await.unwrap(), b"two");
    }
}
