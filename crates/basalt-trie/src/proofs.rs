//! Merkle inclusion / non-inclusion proofs (spec.md §4.3).
//!
//! A proof is the raw bytes of every node visited walking from the root
//! down to the target key. Verification replays the same walk against a
//! throwaway store built only from those bytes, so a tampered node either
//! fails to decode or hashes to something other than what its parent
//! claims — there is no separate "did the hashes chain" check because
//! `get_at` already requires each node to be reachable under its own hash.

use crate::errors::TrieError;
use crate::nibbles::Nibbles;
use crate::node::Node;
use crate::store::{MemoryNodeStore, NodeStore};
use crate::trie::MerkleTrie;
use basalt_types::Hash256;

/// A self-contained inclusion (or non-inclusion) proof for one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    pub root: Hash256,
    pub key: Vec<u8>,
    pub value: Option<Vec<u8>>,
    pub nodes: Vec<Vec<u8>>,
}

/// Walk from `root` collecting the encoded bytes of every node visited for
/// `key`. Returns `None` for an empty trie — there is nothing to prove.
pub fn generate_proof<S: NodeStore>(
    store: &S,
    root: Option<Hash256>,
    key: &[u8],
) -> Result<Option<MerkleProof>, TrieError> {
    let root_hash = match root {
        None => return Ok(None),
        Some(h) => h,
    };

    let path = Nibbles::from_bytes(key).0;
    let mut nodes = Vec::new();
    let mut cursor = Some(root_hash);
    let mut remaining = path.as_slice();
    let mut value = None;

    while let Some(hash) = cursor {
        let bytes = store.get(&hash)?.ok_or(TrieError::NodeMissing(hash))?;
        let node = Node::decode(&bytes)?;
        nodes.push(bytes);

        match node {
            Node::Leaf { path: leaf_path, value: leaf_value } => {
                if leaf_path == remaining {
                    value = Some(leaf_value);
                }
                cursor = None;
            }
            Node::Extension { path: ext_path, child } => {
                if remaining.len() >= ext_path.len() && remaining[..ext_path.len()] == ext_path[..] {
                    remaining = &remaining[ext_path.len()..];
                    cursor = Some(child);
                } else {
                    cursor = None;
                }
            }
            Node::Branch { children, value: branch_value } => {
                if remaining.is_empty() {
                    value = branch_value;
                    cursor = None;
                } else {
                    cursor = children[remaining[0] as usize];
                    remaining = &remaining[1..];
                }
            }
        }
    }

    Ok(Some(MerkleProof {
        root: root_hash,
        key: key.to_vec(),
        value,
        nodes,
    }))
}

/// Generate a proof directly from a [`MerkleTrie`].
pub fn generate_proof_from_trie<S: NodeStore>(
    trie: &MerkleTrie<S>,
    key: &[u8],
) -> Result<Option<MerkleProof>, TrieError> {
    generate_proof(trie.store(), trie.root(), key)
}

/// Verify that `proof.value` is really what a trie rooted at `proof.root`
/// would return for `proof.key`, using only the node bytes carried in the
/// proof.
pub fn verify_proof(proof: &MerkleProof) -> bool {
    let scratch = MemoryNodeStore::new();
    for bytes in &proof.nodes {
        // Decoding validates shape (tag/flag consistency, branch live-slot
        // count); the store key is the hash of the exact bytes received so
        // any tampering — including trailing garbage a lenient decode
        // might otherwise ignore — changes what a parent's child hash
        // resolves to.
        if Node::decode(bytes).is_err() {
            return false;
        }
        let hash = basalt_crypto::blake3_hash(bytes);
        if scratch.put(hash, bytes.clone()).is_err() {
            return false;
        }
    }

    match get_from(&scratch, Some(proof.root), &Nibbles::from_bytes(&proof.key).0) {
        Ok(found) => found == proof.value,
        Err(_) => false,
    }
}

fn get_from<S: NodeStore>(store: &S, root: Option<Hash256>, path: &[u8]) -> Result<Option<Vec<u8>>, TrieError> {
    let hash = match root {
        None => return Ok(None),
        Some(h) => h,
    };
    let bytes = store.get(&hash)?.ok_or(TrieError::NodeMissing(hash))?;
    let node = Node::decode(&bytes)?;
    match node {
        Node::Leaf { path: leaf_path, value } => {
            if leaf_path == path {
                Ok(Some(value))
            } else {
                Ok(None)
            }
        }
        Node::Extension { path: ext_path, child } => {
            if path.len() >= ext_path.len() && path[..ext_path.len()] == ext_path[..] {
                get_from(store, Some(child), &path[ext_path.len()..])
            } else {
                Ok(None)
            }
        }
        Node::Branch { children, value } => {
            if path.is_empty() {
                Ok(value)
            } else {
                get_from(store, children[path[0] as usize], &path[1..])
            }
        }
    }
}
