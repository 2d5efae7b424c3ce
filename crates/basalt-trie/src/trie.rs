//! Insert / get / delete / collapse over the content-addressed node store.
//!
//! `put` and `delete` are written as pure functions over `Option<Hash256>`
//! (the current subtree root, `None` meaning `Empty`) that return the new
//! subtree root; all new nodes are inserted into the store as a side
//! effect, never mutated in place, so the same root hash is always reached
//! for the same key set regardless of insertion order (spec.md §8).

use crate::errors::TrieError;
use crate::nibbles::Nibbles;
use crate::node::Node;
use crate::store::NodeStore;
use basalt_types::Hash256;

fn insert_node<S: NodeStore>(store: &S, node: Node) -> Result<Hash256, TrieError> {
    let hash = node.hash();
    store.put(hash, node.encode())?;
    Ok(hash)
}

fn load<S: NodeStore>(store: &S, hash: Hash256) -> Result<Node, TrieError> {
    let bytes = store.get(&hash)?.ok_or(TrieError::NodeMissing(hash))?;
    Node::decode(&bytes)
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// A pure, content-addressed Merkle-Patricia trie over a [`NodeStore`].
pub struct MerkleTrie<S: NodeStore> {
    store: S,
    root: Option<Hash256>,
}

impl<S: NodeStore> MerkleTrie<S> {
    /// A fresh, empty trie over `store`.
    pub fn new(store: S) -> Self {
        Self { store, root: None }
    }

    /// Resume a trie at a previously computed root.
    pub fn with_root(store: S, root: Option<Hash256>) -> Self {
        Self { store, root }
    }

    /// The current root hash. Empty tries have no real root hash; callers
    /// that need a stable sentinel should treat `None` as "empty".
    pub fn root(&self) -> Option<Hash256> {
        self.root
    }

    /// Borrow the underlying store (used by proof generation and GC).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `get(key) → value?`
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TrieError> {
        get_at(&self.store, self.root, &Nibbles::from_bytes(key).0)
    }

    /// `put(key, value)`, returning the new root hash.
    pub fn put(&mut self, key: &[u8], value: Vec<u8>) -> Result<Hash256, TrieError> {
        let path = Nibbles::from_bytes(key).0;
        let new_root = put_at(&self.store, self.root, &path, value)?;
        self.root = Some(new_root);
        Ok(new_root)
    }

    /// `delete(key) → bool`, `true` if the key was present.
    pub fn delete(&mut self, key: &[u8]) -> Result<bool, TrieError> {
        let path = Nibbles::from_bytes(key).0;
        let (new_root, deleted) = delete_at(&self.store, self.root, &path)?;
        self.root = new_root;
        Ok(deleted)
    }
}

fn get_at<S: NodeStore>(
    store: &S,
    root: Option<Hash256>,
    path: &[u8],
) -> Result<Option<Vec<u8>>, TrieError> {
    let hash = match root {
        None => return Ok(None),
        Some(h) => h,
    };
    let node = load(store, hash)?;
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
                get_at(store, Some(child), &path[ext_path.len()..])
            } else {
                Ok(None)
            }
        }
        Node::Branch { children, value } => {
            if path.is_empty() {
                Ok(value)
            } else {
                get_at(store, children[path[0] as usize], &path[1..])
            }
        }
    }
}

enum Existing {
    Leaf(Vec<u8>),
    ExtensionChild(Hash256),
}

fn put_at<S: NodeStore>(
    store: &S,
    root: Option<Hash256>,
    path: &[u8],
    value: Vec<u8>,
) -> Result<Hash256, TrieError> {
    match root {
        None => insert_node(
            store,
            Node::Leaf {
                path: path.to_vec(),
                value,
            },
        ),
        Some(hash) => {
            let node = load(store, hash)?;
            match node {
                Node::Leaf { path: leaf_path, value: leaf_value } => {
                    if leaf_path == path {
                        insert_node(store, Node::Leaf { path, value })
                    } else {
                        split(store, &leaf_path, Existing::Leaf(leaf_value), path, value)
                    }
                }
                Node::Extension { path: ext_path, child } => {
                    let common = common_prefix_len(&ext_path, path);
                    if common == ext_path.len() {
                        let new_child = put_at(store, Some(child), &path[common..], value)?;
                        insert_node(
                            store,
                            Node::Extension {
                                path: ext_path,
                                child: new_child,
                            },
                        )
                    } else {
                        split(store, &ext_path, Existing::ExtensionChild(child), path, value)
                    }
                }
                Node::Branch { mut children, mut value: branch_value } => {
                    if path.is_empty() {
                        branch_value = Some(value);
                    } else {
                        let idx = path[0] as usize;
                        children[idx] = Some(put_at(store, children[idx], &path[1..], value)?);
                    }
                    insert_node(
                        store,
                        Node::Branch {
                            children,
                            value: branch_value,
                        },
                    )
                }
            }
        }
    }
}

/// Split an existing Leaf or Extension on a differing nibble, producing a
/// Branch with up to two new children plus an optional common-prefix
/// Extension (spec.md §4.3).
fn split<S: NodeStore>(
    store: &S,
    old_path: &[u8],
    existing: Existing,
    new_path: &[u8],
    new_value: Vec<u8>,
) -> Result<Hash256, TrieError> {
    let common = common_prefix_len(old_path, new_path);
    let mut children: [Option<Hash256>; 16] = Default::default();
    let mut branch_value = None;

    if common == old_path.len() {
        // Old content terminates exactly at the branch (only possible for
        // a Leaf — an Extension reaching this point would have taken the
        // non-splitting recursion branch in `put_at`).
        match existing {
            Existing::Leaf(v) => branch_value = Some(v),
            Existing::ExtensionChild(_) => {
                return Err(TrieError::MalformedNode(
                    "extension fully consumed during split".into(),
                ))
            }
        }
    } else {
        let nibble = old_path[common] as usize;
        let remaining = &old_path[common + 1..];
        let child_hash = match existing {
            Existing::Leaf(v) => insert_node(
                store,
                Node::Leaf {
                    path: remaining.to_vec(),
                    value: v,
                },
            )?,
            Existing::ExtensionChild(child) => {
                if remaining.is_empty() {
                    child
                } else {
                    insert_node(
                        store,
                        Node::Extension {
                            path: remaining.to_vec(),
                            child,
                        },
                    )?
                }
            }
        };
        children[nibble] = Some(child_hash);
    }

    if common == new_path.len() {
        branch_value = Some(new_value);
    } else {
        let nibble = new_path[common] as usize;
        let remaining = &new_path[common + 1..];
        let hash = insert_node(
            store,
            Node::Leaf {
                path: remaining.to_vec(),
                value: new_value,
            },
        )?;
        children[nibble] = Some(hash);
    }

    let branch_hash = insert_node(store, Node::Branch { children, value: branch_value })?;

    if common == 0 {
        Ok(branch_hash)
    } else {
        insert_node(
            store,
            Node::Extension {
                path: old_path[..common].to_vec(),
                child: branch_hash,
            },
        )
    }
}

fn delete_at<S: NodeStore>(
    store: &S,
    root: Option<Hash256>,
    path: &[u8],
) -> Result<(Option<Hash256>, bool), TrieError> {
    let hash = match root {
        None => return Ok((None, false)),
        Some(h) => h,
    };
    let node = load(store, hash)?;
    match node {
        Node::Leaf { path: leaf_path, .. } => {
            if leaf_path == path {
                Ok((None, true))
            } else {
                Ok((Some(hash), false))
            }
        }
        Node::Extension { path: ext_path, child } => {
            if path.len() >= ext_path.len() && path[..ext_path.len()] == ext_path[..] {
                let (new_child, deleted) = delete_at(store, Some(child), &path[ext_path.len()..])?;
                if !deleted {
                    return Ok((Some(hash), false));
                }
                match new_child {
                    None => Ok((None, true)),
                    Some(new_child_hash) => Ok((Some(merge_extension(store, &ext_path, new_child_hash)?), true)),
                }
            } else {
                Ok((Some(hash), false))
            }
        }
        Node::Branch { mut children, mut value } => {
            if path.is_empty() {
                if value.is_none() {
                    return Ok((Some(hash), false));
                }
                value = None;
            } else {
                let idx = path[0] as usize;
                let (new_child, deleted) = delete_at(store, children[idx], &path[1..])?;
                if !deleted {
                    return Ok((Some(hash), false));
                }
                children[idx] = new_child;
            }

            let live = Node::branch_live_slots(&children, &value);
            if live == 0 {
                Ok((None, true))
            } else if live == 1 {
                Ok((Some(collapse_branch(store, &children, &value)?), true))
            } else {
                Ok((Some(insert_node(store, Node::Branch { children, value })?), true))
            }
        }
    }
}

/// A branch with exactly one live slot collapses into an Extension (if the
/// surviving slot is a child) or a bare Leaf (if the surviving slot is the
/// branch's own value).
fn collapse_branch<S: NodeStore>(
    store: &S,
    children: &[Option<Hash256>; 16],
    value: &Option<Vec<u8>>,
) -> Result<Hash256, TrieError> {
    if let Some(v) = value {
        return insert_node(
            store,
            Node::Leaf {
                path: vec![],
                value: v.clone(),
            },
        );
    }
    let (nibble, child_hash) = children
        .iter()
        .enumerate()
        .find_map(|(i, c)| c.map(|h| (i as u8, h)))
        .expect("collapse_branch called with zero live slots");
    merge_extension(store, &[nibble], child_hash)
}

/// Fold `prefix` into whatever node `child_hash` refers to, keeping the
/// canonical invariant that an Extension's child is always a Branch (never
/// another Extension or a Leaf — those get merged into one node instead).
fn merge_extension<S: NodeStore>(
    store: &S,
    prefix: &[u8],
    child_hash: Hash256,
) -> Result<Hash256, TrieError> {
    let child = load(store, child_hash)?;
    match child {
        Node::Leaf { path: child_path, value } => {
            let mut combined = prefix.to_vec();
            combined.extend_from_slice(&child_path);
            insert_node(store, Node::Leaf { path: combined, value })
        }
        Node::Extension { path: child_path, child } => {
            let mut combined = prefix.to_vec();
            combined.extend_from_slice(&child_path);
            insert_node(store, Node::Extension { path: combined, child })
        }
        Node::Branch { .. } => insert_node(
            store,
            Node::Extension {
                path: prefix.to_vec(),
                child: child_hash,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNodeStore;
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    #[test]
    fn get_on_empty_trie_is_none() {
        let trie = MerkleTrie::new(MemoryNodeStore::new());
        assert_eq!(trie.get(b"anything").unwrap(), None);
    }

    #[test]
    fn put_then_get_roundtrip() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(b"key1", b"value1".to_vec()).unwrap();
        assert_eq!(trie.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(trie.get(b"key2").unwrap(), None);
    }

    #[test]
    fn overwrite_existing_key() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(b"key1", b"v1".to_vec()).unwrap();
        trie.put(b"key1", b"v2".to_vec()).unwrap();
        assert_eq!(trie.get(b"key1").unwrap(), Some(b"v2".to_vec()));
    }

    /// Scenario 4 from spec.md §8: split then delete collapses exactly.
    #[test]
    fn split_then_delete_collapses_to_single_leaf_root() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(&[0x01], b"v1".to_vec()).unwrap();
        let root_after_k1 = trie.root().unwrap();

        trie.put(&[0x01, 0x02], b"v2".to_vec()).unwrap();
        assert_ne!(trie.root().unwrap(), root_after_k1);

        let deleted = trie.delete(&[0x01, 0x02]).unwrap();
        assert!(deleted);
        assert_eq!(trie.root().unwrap(), root_after_k1);
        assert_eq!(trie.get(&[0x01]).unwrap(), Some(b"v1".to_vec()));
        assert_eq!(trie.get(&[0x01, 0x02]).unwrap(), None);
    }

    #[test]
    fn delete_missing_key_returns_false() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(b"key1", b"v".to_vec()).unwrap();
        assert!(!trie.delete(b"missing").unwrap());
    }

    #[test]
    fn delete_all_keys_returns_to_empty_root() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(b"a", b"1".to_vec()).unwrap();
        trie.put(b"b", b"2".to_vec()).unwrap();
        trie.delete(b"a").unwrap();
        trie.delete(b"b").unwrap();
        assert_eq!(trie.root(), None);
    }

    /// Universal invariant from spec.md §8: root hash is independent of
    /// insertion order for the same key set.
    #[test]
    fn root_hash_independent_of_insertion_order() {
        let entries: Vec<(Vec<u8>, Vec<u8>)> = (0u8..20)
            .map(|i| (vec![i, i.wrapping_mul(7)], vec![i, 0xFF]))
            .collect();

        let mut order_a = entries.clone();
        let mut trie_a = MerkleTrie::new(MemoryNodeStore::new());
        for (k, v) in &order_a {
            trie_a.put(k, v.clone()).unwrap();
        }

        order_a.shuffle(&mut thread_rng());
        let mut trie_b = MerkleTrie::new(MemoryNodeStore::new());
        for (k, v) in &order_a {
            trie_b.put(k, v.clone()).unwrap();
        }

        assert_eq!(trie_a.root(), trie_b.root());
    }

    #[test]
    fn branch_collapses_on_delete_of_one_of_three_siblings() {
        let mut trie = MerkleTrie::new(MemoryNodeStore::new());
        trie.put(&[0x00], b"a".to_vec()).unwrap();
        trie.put(&[0x10], b"b".to_vec()).unwrap();
        trie.put(&[0x20], b"c".to_vec()).unwrap();
        trie.delete(&[0x00]).unwrap();
        trie.delete(&[0x10]).unwrap();
        assert_eq!(trie.get(&[0x20]).unwrap(), Some(b"c".to_vec()));

        // Should now collapse to the single remaining leaf's root.
        let mut solo = MerkleTrie::new(MemoryNodeStore::new());
        solo.put(&[0x20], b"c".to_vec()).unwrap();
        assert_eq!(trie.root(), solo.root());
    }
}
