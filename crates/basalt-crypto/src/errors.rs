//! Cryptographic error types.

use thiserror::Error;

/// Errors raised by hashing and signature operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// A streaming hasher was used after `finalize()` had already consumed it.
    #[error("streaming hasher used after finalize (disposed)")]
    HasherDisposed,

    /// A key or signature byte slice was not the length its type requires.
    #[error("invalid key/signature length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Signature verification failed.
    #[error("signature verification failed")]
    VerifyFailed,

    /// Underlying BLS library reported an error.
    #[error("bls error: {0}")]
    Bls(String),

    /// Batch verification was called with mismatched input vector lengths.
    #[error("batch inputs have mismatched lengths: pks={pks}, msgs={msgs}, sigs={sigs}")]
    BatchLengthMismatch {
        pks: usize,
        msgs: usize,
        sigs: usize,
    },
}
