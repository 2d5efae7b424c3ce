//! Block/transaction wire codec and gossip message ID derivation
//! (spec.md §4.10).

mod block;
mod errors;
mod header;
mod message_id;
mod transaction;

pub use block::{Block, ChainConfig};
pub use errors::ChainError;
pub use header::Header;
pub use message_id::MessageId;
pub use transaction::{ComplianceProof, Transaction, TransactionType, MAX_COMPLIANCE_PROOFS};
