//! Two non-interchangeable state-root implementations (spec.md §4.4, §9
//! Open Question (i)). Naive hashes account records only and ignores
//! storage; trie-backed additionally folds each account's storage slots
//! into its own sub-trie. No code path may compare the two — they are
//! kept as distinctly named functions rather than behind one trait so a
//! caller can never silently swap one for the other.

use crate::account::AccountState;
use crate::store::StateStore;
use basalt_trie::{MemoryNodeStore, MerkleTrie};
use basalt_types::Hash256;

/// Storage-blind state root: sort accounts by address, hash each encoding
/// in sequence. Used only in tests — it cannot represent storage-slot
/// changes, so it must never be compared against
/// [`compute_trie_state_root`] for the same store.
pub fn compute_naive_state_root(store: &StateStore) -> Hash256 {
    let mut hasher = basalt_crypto::StreamingHasher::new();
    for (address, account) in store.accounts_sorted() {
        hasher.update(address.as_bytes());
        hasher.update(&account.encode());
    }
    hasher.finalize().unwrap_or(Hash256::ZERO)
}

/// Trie-backed state root: each account is a leaf in the top-level trie
/// keyed by address, whose value is the account's encoding with
/// `storage_root` set to that account's own storage sub-trie root.
pub fn compute_trie_state_root(store: &StateStore) -> Result<Hash256, crate::errors::StateError> {
    let mut top = MerkleTrie::new(MemoryNodeStore::new());

    for (address, account) in store.accounts_sorted() {
        let storage_root = compute_storage_root(store, &address)?;
        let account_with_root = AccountState {
            storage_root,
            ..account
        };
        top.put(address.as_bytes(), account_with_root.encode())?;
    }

    Ok(top.root().unwrap_or(Hash256::ZERO))
}

/// Hash of one account's storage slots, independent of every other
/// account's storage.
fn compute_storage_root(
    store: &StateStore,
    address: &basalt_types::Address,
) -> Result<Hash256, crate::errors::StateError> {
    let slots = store.storage_slots_sorted(address);
    if slots.is_empty() {
        return Ok(Hash256::ZERO);
    }
    let mut sub = MerkleTrie::new(MemoryNodeStore::new());
    for (slot, value) in slots {
        sub.put(slot.as_bytes(), value)?;
    }
    Ok(sub.root().unwrap_or(Hash256::ZERO))
}
