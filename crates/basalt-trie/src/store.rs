//! Content-addressed node storage.
//!
//! Single-writer, many-reader per spec.md §5: callers serialize their own
//! writes (trie mutation is a pure function producing new nodes), so the
//! store only needs to make concurrent reads safe against an in-flight
//! write, which `parking_lot::RwLock` gives for free.

use crate::errors::TrieError;
use basalt_types::Hash256;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A content-addressed key-value store keyed by node hash.
pub trait NodeStore {
    /// Fetch the bytes stored under `hash`, if any.
    fn get(&self, hash: &Hash256) -> Result<Option<Vec<u8>>, TrieError>;

    /// Store `bytes` under `hash`. Idempotent: inserting the same hash
    /// twice with the same bytes is a no-op (nodes are immutable).
    fn put(&self, hash: Hash256, bytes: Vec<u8>) -> Result<(), TrieError>;

    /// Remove the entry for `hash`, if present.
    fn remove(&self, hash: &Hash256) -> Result<(), TrieError>;

    /// Every hash currently in the store — used by the mark-and-sweep GC.
    fn all_hashes(&self) -> Result<Vec<Hash256>, TrieError>;

    /// Number of entries currently stored.
    fn len(&self) -> usize;
}

/// An in-memory [`NodeStore`] backed by a `HashMap` behind a `RwLock`.
#[derive(Default)]
pub struct MemoryNodeStore {
    inner: RwLock<HashMap<Hash256, Vec<u8>>>,
}

impl MemoryNodeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeStore for MemoryNodeStore {
    fn get(&self, hash: &Hash256) -> Result<Option<Vec<u8>>, TrieError> {
        Ok(self.inner.read().get(hash).cloned())
    }

    fn put(&self, hash: Hash256, bytes: Vec<u8>) -> Result<(), TrieError> {
        self.inner.write().entry(hash).or_insert(bytes);
        Ok(())
    }

    fn remove(&self, hash: &Hash256) -> Result<(), TrieError> {
        self.inner.write().remove(hash);
        Ok(())
    }

    fn all_hashes(&self) -> Result<Vec<Hash256>, TrieError> {
        Ok(self.inner.read().keys().copied().collect())
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_roundtrips() {
        let store = MemoryNodeStore::new();
        let h = Hash256([1u8; 32]);
        store.put(h, vec![1, 2, 3]).unwrap();
        assert_eq!(store.get(&h).unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_hash_returns_none() {
        let store = MemoryNodeStore::new();
        assert_eq!(store.get(&Hash256([2u8; 32])).unwrap(), None);
    }

    #[test]
    fn remove_deletes_entry() {
        let store = MemoryNodeStore::new();
        let h = Hash256([3u8; 32]);
        store.put(h, vec![9]).unwrap();
        store.remove(&h).unwrap();
        assert_eq!(store.get(&h).unwrap(), None);
    }
}
