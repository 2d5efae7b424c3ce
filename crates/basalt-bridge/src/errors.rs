//! Bridge failure modes (spec.md §4.11).

use basalt_types::Hash256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// This lock has already been unlocked on the target side; replay rejected.
    #[error("lock {0} already unlocked")]
    AlreadyUnlocked(Hash256),

    /// Two attestations in the same unlock request named the same guardian.
    #[error("duplicate attestation from guardian index {0}")]
    DuplicateSigner(u8),

    /// An attestation named a guardian index outside the guardian set.
    #[error("attestation references unknown guardian index {0}")]
    InvalidSignerIndex(u8),

    /// Fewer valid attestations than the guardian set's threshold requires.
    #[error("insufficient attestations: have {have}, need {need}")]
    InsufficientAttestations { have: usize, need: usize },

    /// Guardian set threshold was zero or exceeded its own guardian count.
    #[error("invalid guardian threshold {threshold} for {guardians} guardians")]
    InvalidThreshold { threshold: usize, guardians: usize },

    /// A requested lock event was not present in the lock ledger.
    #[error("unknown lock id {0}")]
    UnknownLock(Hash256),

    #[error(transparent)]
    Trie(#[from] basalt_trie::TrieError),

    #[error(transparent)]
    Codec(#[from] basalt_codec::CodecError),
}
