//! Content-addressed branch-16 Merkle-Patricia trie.
//!
//! Nodes are BLAKE3-hashed over a canonical encoding (spec.md §4.3) rather
//! than the Keccak/RLP shape used by Ethereum-style tries — two trees over
//! the same key/value set always converge to the same root hash regardless
//! of insertion order, and deletion collapses branches back down so the
//! root after insert-then-delete matches the root that never saw the
//! insert at all.

mod errors;
mod gc;
mod nibbles;
mod node;
mod proofs;
mod store;
mod trie;

pub use errors::TrieError;
pub use gc::{collect_reachable, prune};
pub use nibbles::{decode_hex_prefix, encode_hex_prefix, Nibbles};
pub use node::Node;
pub use proofs::{generate_proof, generate_proof_from_trie, verify_proof, MerkleProof};
pub use store::{MemoryNodeStore, NodeStore};
pub use trie::MerkleTrie;
