//! Flat account/storage database (spec.md §4.4).
//!
//! Two flat maps — `Address → AccountState` and `(Address, Hash256) →
//! bytes` — with copy-on-write fork for speculative execution and an
//! overlay for building a block on top of a shared base without mutating
//! it. State-root computation is deliberately split into two
//! non-interchangeable functions; see [`root`] for why.

mod account;
mod errors;
mod root;
mod store;

pub use account::{AccountState, AccountType};
pub use errors::StateError;
pub use root::{compute_naive_state_root, compute_trie_state_root};
pub use store::{OverlayStore, StateStore};
