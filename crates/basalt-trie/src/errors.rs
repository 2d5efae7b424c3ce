//! Trie failure modes (spec.md §4.3).

use basalt_types::Hash256;
use thiserror::Error;

/// Errors raised by trie operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrieError {
    /// A node hash referenced by a parent was not present in the store.
    #[error("trie node missing: {0}")]
    NodeMissing(Hash256),

    /// A node's encoded bytes didn't satisfy the canonical encoding rules.
    #[error("malformed node encoding: {0}")]
    MalformedNode(String),

    /// An inclusion proof did not reconstruct to the claimed root/value.
    #[error("invalid proof")]
    InvalidProof,
}
