//! Mark-and-sweep garbage collection over a [`NodeStore`].
//!
//! The trie never deletes a node in place — `put`/`delete` only ever add
//! new nodes, so a store accumulates every historical version of every
//! subtree it has ever held. `collect_reachable` marks everything still
//! referenced from a set of live roots; `prune` sweeps the rest.

use crate::errors::TrieError;
use crate::node::Node;
use crate::store::NodeStore;
use basalt_types::Hash256;
use std::collections::HashSet;

/// All node hashes reachable from `roots`.
pub fn collect_reachable<S: NodeStore>(
    store: &S,
    roots: &[Hash256],
) -> Result<HashSet<Hash256>, TrieError> {
    let mut seen = HashSet::new();
    let mut stack: Vec<Hash256> = roots.to_vec();

    while let Some(hash) = stack.pop() {
        if !seen.insert(hash) {
            continue;
        }
        let bytes = store.get(&hash)?.ok_or(TrieError::NodeMissing(hash))?;
        let node = Node::decode(&bytes)?;
        match node {
            Node::Leaf { .. } => {}
            Node::Extension { child, .. } => stack.push(child),
            Node::Branch { children, .. } => {
                for child in children.into_iter().flatten() {
                    stack.push(child);
                }
            }
        }
    }

    Ok(seen)
}

/// Remove every entry in `store` not present in `reachable`. Returns the
/// number of entries removed.
pub fn prune<S: NodeStore>(store: &S, reachable: &HashSet<Hash256>) -> Result<usize, TrieError> {
    let mut removed = 0;
    for hash in store.all_hashes()? {
        if !reachable.contains(&hash) {
            store.remove(&hash)?;
            removed += 1;
        }
    }
    Ok(removed)
}
