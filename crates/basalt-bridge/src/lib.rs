//! Bridge core (spec.md §4.11): unidirectional lock-on-home,
//! unlock-on-target primitive. Watching external chains, relaying
//! transactions between them, and any cross-chain SDK surface are out of
//! scope here — this crate only supplies the cryptographic core a relayer
//! application would call into: committing locks, proving their inclusion,
//! collecting guardian attestations, and guarding against unlock replay.

mod errors;
mod ledger;
mod lock;
mod multisig;
mod unlock;

pub use errors::BridgeError;
pub use ledger::{verify_lock_inclusion, LockLedger};
pub use lock::{LockEvent, LOCK_DOMAIN_TAG};
pub use multisig::{attestation_message, Attestation, GuardianSet, UNLOCK_DOMAIN_TAG};
pub use unlock::UnlockRegistry;
