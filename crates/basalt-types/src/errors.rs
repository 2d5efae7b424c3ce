//! Error types for value-type parsing and arithmetic.

use thiserror::Error;

/// Errors raised while constructing or parsing a fixed-width value type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Hex string did not decode to the expected byte length.
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// Hex string contained a non-hex character.
    #[error("invalid hex character at byte offset {0}")]
    InvalidHex(usize),

    /// Hex string was missing the `0x` prefix.
    #[error("hex string missing 0x prefix")]
    MissingPrefix,

    /// A checked arithmetic operation on `UInt256` overflowed or underflowed.
    #[error("arithmetic overflow")]
    Overflow,
}
