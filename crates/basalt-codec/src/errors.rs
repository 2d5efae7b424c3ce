//! Codec failure modes (spec.md §4.1).

use thiserror::Error;

/// Errors raised while decoding a buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Not enough bytes remained in the buffer for the requested read.
    #[error("short buffer: need {need} bytes, have {have}")]
    ShortBuffer { need: usize, have: usize },

    /// A multi-byte varint's final byte was `0x00`, which is never the
    /// minimal encoding of any value (a minimal encoding's final byte is
    /// always non-zero, or the varint is a single `0x00` byte for value 0).
    #[error("non-minimal varint encoding")]
    NonMinimalVarInt,

    /// The 10th continuation byte carried bits that would overflow `u64`.
    #[error("varint overflows u64")]
    VarIntOverflow,

    /// A varint ran past the 10-byte maximum for a `u64` LEB128 encoding.
    #[error("varint exceeds maximum length of 10 bytes")]
    VarIntTooLong,

    /// A length-prefixed field's declared length exceeded its configured
    /// maximum (`MaxBytesLength`, `MaxStringLength`, or a caller-supplied cap).
    #[error("oversize length prefix: declared {declared}, max {max}")]
    OversizeLengthPrefix { declared: u64, max: u64 },

    /// A length-prefixed string's bytes were not valid UTF-8.
    #[error("invalid utf-8 in length-prefixed string")]
    InvalidUtf8,

    /// An enum discriminant byte did not match any known variant.
    #[error("unknown tag byte {tag}")]
    UnknownTag { tag: u8 },
}
