//! Flat account/storage maps with copy-on-write fork and overlay
//! (spec.md §4.4).

use crate::account::AccountState;
use basalt_types::{Address, Hash256};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A flat, in-memory account/storage database.
///
/// `fork()` produces a deep-copied snapshot with no shared mutable state —
/// writes to the fork never touch the parent, and the fork can be advanced
/// speculatively then discarded.
#[derive(Default)]
pub struct StateStore {
    accounts: RwLock<HashMap<Address, AccountState>>,
    storage: RwLock<HashMap<(Address, Hash256), Vec<u8>>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_account(&self, address: &Address) -> Option<AccountState> {
        self.accounts.read().get(address).cloned()
    }

    pub fn set_account(&self, address: Address, account: AccountState) {
        self.accounts.write().insert(address, account);
    }

    pub fn remove_account(&self, address: &Address) {
        self.accounts.write().remove(address);
    }

    pub fn get_storage(&self, address: &Address, slot: &Hash256) -> Option<Vec<u8>> {
        self.storage.read().get(&(*address, *slot)).cloned()
    }

    /// Deep-copies `value` into the map — storage slots never alias a
    /// caller-held buffer.
    pub fn set_storage(&self, address: Address, slot: Hash256, value: Vec<u8>) {
        self.storage.write().insert((address, slot), value);
    }

    pub fn remove_storage(&self, address: &Address, slot: &Hash256) {
        self.storage.write().remove(&(*address, *slot));
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    /// All `(slot, value)` pairs touched by `address`, sorted by slot — the
    /// order the trie-backed storage root hashes over. The flat map has no
    /// per-address index, so this scans the full storage table.
    pub fn storage_slots_sorted(&self, address: &Address) -> Vec<(Hash256, Vec<u8>)> {
        let mut out: Vec<_> = self
            .storage
            .read()
            .iter()
            .filter(|((a, _), _)| a == address)
            .map(|((_, slot), value)| (*slot, value.clone()))
            .collect();
        out.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        out
    }

    /// All `(address, account)` pairs, sorted by address — the order the
    /// naive state root hashes over.
    pub fn accounts_sorted(&self) -> Vec<(Address, AccountState)> {
        let mut out: Vec<_> = self
            .accounts
            .read()
            .iter()
            .map(|(a, s)| (*a, s.clone()))
            .collect();
        out.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        out
    }

    /// A snapshot sharing no mutable state with `self`: further writes to
    /// either side are invisible to the other.
    pub fn fork(&self) -> StateStore {
        StateStore {
            accounts: RwLock::new(self.accounts.read().clone()),
            storage: RwLock::new(self.storage.read().clone()),
        }
    }
}

/// Layers writes on top of a read-only base for copy-on-write block
/// building: reads check the overlay first, then fall through to `base`.
/// `base` is never mutated.
pub struct OverlayStore {
    base: Arc<StateStore>,
    accounts: RwLock<HashMap<Address, Option<AccountState>>>,
    storage: RwLock<HashMap<(Address, Hash256), Option<Vec<u8>>>>,
}

impl OverlayStore {
    pub fn new(base: Arc<StateStore>) -> Self {
        Self {
            base,
            accounts: RwLock::new(HashMap::new()),
            storage: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_account(&self, address: &Address) -> Option<AccountState> {
        if let Some(overridden) = self.accounts.read().get(address) {
            return overridden.clone();
        }
        self.base.get_account(address)
    }

    pub fn set_account(&self, address: Address, account: AccountState) {
        self.accounts.write().insert(address, Some(account));
    }

    pub fn remove_account(&self, address: &Address) {
        self.accounts.write().insert(*address, None);
    }

    pub fn get_storage(&self, address: &Address, slot: &Hash256) -> Option<Vec<u8>> {
        if let Some(overridden) = self.storage.read().get(&(*address, *slot)) {
            return overridden.clone();
        }
        self.base.get_storage(address, slot)
    }

    pub fn set_storage(&self, address: Address, slot: Hash256, value: Vec<u8>) {
        self.storage.write().insert((address, slot), Some(value));
    }

    pub fn remove_storage(&self, address: &Address, slot: &Hash256) {
        self.storage.write().insert((*address, *slot), None);
    }

    /// Flatten this overlay's writes into a fresh [`StateStore`] seeded
    /// from `base`, used once a speculative fork is accepted.
    pub fn commit(&self) -> StateStore {
        let committed = self.base.fork();
        for (address, account) in self.accounts.read().iter() {
            match account {
                Some(a) => committed.set_account(*address, a.clone()),
                None => committed.remove_account(address),
            }
        }
        for ((address, slot), value) in self.storage.read().iter() {
            match value {
                Some(v) => committed.set_storage(*address, *slot, v.clone()),
                None => committed.remove_storage(address, slot),
            }
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountState;
    use basalt_types::UInt256;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn set_then_get_account() {
        let store = StateStore::new();
        let mut account = AccountState::new_externally_owned();
        account.balance = UInt256::from_u64(500);
        store.set_account(addr(1), account.clone());
        assert_eq!(store.get_account(&addr(1)), Some(account));
    }

    #[test]
    fn fork_shares_no_mutable_state_with_parent() {
        let parent = StateStore::new();
        parent.set_account(addr(1), AccountState::new_externally_owned());

        let fork = parent.fork();
        let mut forked_account = AccountState::new_externally_owned();
        forked_account.nonce = 9;
        fork.set_account(addr(1), forked_account);

        assert_eq!(parent.get_account(&addr(1)).unwrap().nonce, 0);
        assert_eq!(fork.get_account(&addr(1)).unwrap().nonce, 9);
    }

    #[test]
    fn set_storage_deep_copies_value() {
        let store = StateStore::new();
        let mut value = vec![1, 2, 3];
        store.set_storage(addr(1), Hash256::ZERO, value.clone());
        value[0] = 99;
        assert_eq!(store.get_storage(&addr(1), &Hash256::ZERO), Some(vec![1, 2, 3]));
    }

    #[test]
    fn overlay_reads_fall_through_to_base_until_overridden() {
        let base = Arc::new(StateStore::new());
        base.set_account(addr(1), AccountState::new_externally_owned());

        let overlay = OverlayStore::new(base.clone());
        assert!(overlay.get_account(&addr(1)).is_some());

        overlay.remove_account(&addr(1));
        assert_eq!(overlay.get_account(&addr(1)), None);
        // Base is untouched.
        assert!(base.get_account(&addr(1)).is_some());
    }

    #[test]
    fn overlay_commit_flattens_writes_onto_a_copy_of_base() {
        let base = Arc::new(StateStore::new());
        base.set_account(addr(1), AccountState::new_externally_owned());

        let overlay = OverlayStore::new(base.clone());
        let mut updated = AccountState::new_externally_owned();
        updated.nonce = 3;
        overlay.set_account(addr(1), updated.clone());

        let committed = overlay.commit();
        assert_eq!(committed.get_account(&addr(1)), Some(updated));
        assert_eq!(base.get_account(&addr(1)).unwrap().nonce, 0);
    }
}
