//! Handshake message shapes and verification (spec.md §4.8). Each side
//! holds a long-term Ed25519 identity and generates a fresh X25519
//! ephemeral per connection; the ephemeral is bound to the identity by
//! signing it, so a man-in-the-middle cannot substitute their own
//! ephemeral without the real identity key.

use crate::errors::TransportError;
use basalt_codec::{Reader, Writer};
use basalt_crypto::ed25519;
use basalt_types::{Hash256, PublicKey, Signature};

/// A peer's claimed position in the chain, exchanged so both sides can
/// immediately tell whether the other is worth syncing from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestHead {
    pub number: u64,
    pub hash: Hash256,
}

/// First handshake message: identity, ephemeral key, and chain context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hello {
    pub ed25519_pk: PublicKey,
    pub x25519_pk: [u8; 32],
    /// Signature by `ed25519_pk`'s secret key over `x25519_pk`, binding the
    /// ephemeral to the long-term identity.
    pub signature: Signature,
    pub genesis_hash: Hash256,
    pub chain_id: u32,
    pub protocol_version: u32,
    pub best_head: BestHead,
}

impl Hello {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_raw(self.ed25519_pk.as_bytes());
        w.write_raw(&self.x25519_pk);
        w.write_raw(&self.signature.0);
        w.write_raw(self.genesis_hash.as_bytes());
        w.write_u32_le(self.chain_id);
        w.write_u32_le(self.protocol_version);
        w.write_u64_le(self.best_head.number);
        w.write_raw(self.best_head.hash.as_bytes());
        w.into_vec()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TransportError> {
        let mut r = Reader::new(bytes);
        Ok(Self {
            ed25519_pk: PublicKey(r.read_fixed::<32>()?),
            x25519_pk: r.read_fixed::<32>()?,
            signature: Signature(r.read_fixed::<64>()?),
            genesis_hash: Hash256(r.read_fixed::<32>()?),
            chain_id: r.read_u32_le()?,
            protocol_version: r.read_u32_le()?,
            best_head: BestHead {
                number: r.read_u64_le()?,
                hash: Hash256(r.read_fixed::<32>()?),
            },
        })
    }

    /// Verify `signature` covers `x25519_pk` under `ed25519_pk`.
    pub fn verify_ephemeral_binding(&self) -> Result<(), TransportError> {
        ed25519::verify(&self.ed25519_pk, &self.x25519_pk, &self.signature)
            .map_err(|_| TransportError::HandshakeSignatureInvalid)
    }
}

/// Reasons the responder may refuse a `HELLO`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    GenesisMismatch,
    ChainIdMismatch,
    ProtocolVersionMismatch,
    BadSignature,
}

impl RejectReason {
    fn tag(self) -> u8 {
        match self {
            RejectReason::GenesisMismatch => 0,
            RejectReason::ChainIdMismatch => 1,
            RejectReason::ProtocolVersionMismatch => 2,
            RejectReason::BadSignature => 3,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, TransportError> {
        match tag {
            0 => Ok(RejectReason::GenesisMismatch),
            1 => Ok(RejectReason::ChainIdMismatch),
            2 => Ok(RejectReason::ProtocolVersionMismatch),
            3 => Ok(RejectReason::BadSignature),
            other => Err(TransportError::Codec(basalt_codec::CodecError::UnknownTag { tag: other })),
        }
    }
}

/// Second handshake message: accept, or reject with a reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelloAck {
    Accepted,
    Rejected(RejectReason),
}

impl HelloAck {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        match self {
            HelloAck::Accepted => w.write_u8(1),
            HelloAck::Rejected(reason) => {
                w.write_u8(0);
                w.write_u8(reason.tag());
            }
        }
        w.into_vec()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TransportError> {
        let mut r = Reader::new(bytes);
        match r.read_u8()? {
            1 => Ok(HelloAck::Accepted),
            0 => Ok(HelloAck::Rejected(RejectReason::from_tag(r.read_u8()?)?)),
            other => Err(TransportError::Codec(basalt_codec::CodecError::UnknownTag { tag: other })),
        }
    }
}

/// The local chain context a received `Hello` is checked against.
#[derive(Clone, Debug)]
pub struct ChainContext {
    pub genesis_hash: Hash256,
    pub chain_id: u32,
    pub protocol_version: u32,
}

/// Verify a received `Hello` against our own chain context: signature
/// binding first, then genesis/chain-id/protocol compatibility.
pub fn verify_hello(hello: &Hello, local: &ChainContext) -> Result<(), RejectReason> {
    if hello.verify_ephemeral_binding().is_err() {
        return Err(RejectReason::BadSignature);
    }
    if hello.genesis_hash != local.genesis_hash {
        return Err(RejectReason::GenesisMismatch);
    }
    if hello.chain_id != local.chain_id {
        return Err(RejectReason::ChainIdMismatch);
    }
    if hello.protocol_version != local.protocol_version {
        return Err(RejectReason::ProtocolVersionMismatch);
    }
    Ok(())
}
