//! A contract-emitted log entry (spec.md §6).

use basalt_types::Hash256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub signature_hash: Hash256,
    pub topics: Vec<Hash256>,
    pub data: Vec<u8>,
}
