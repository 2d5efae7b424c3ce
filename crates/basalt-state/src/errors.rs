use basalt_types::Address;
use thiserror::Error;

/// Errors surfaced by the flat state store and root computation.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("account {0} not found")]
    AccountNotFound(Address),

    #[error("trie error computing state root: {0}")]
    Trie(#[from] basalt_trie::TrieError),

    #[error("account encoding error: {0}")]
    Codec(#[from] basalt_codec::CodecError),
}
