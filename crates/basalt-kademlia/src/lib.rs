//! XOR-distance routing table (spec.md §4.6): k-buckets, IP-diversity
//! capping, outbound-protected slots, and iterative-lookup bookkeeping.
//! Sending the actual `FIND_NODE` wire messages is `basalt-gossip`'s and
//! the node binary's job; this crate only decides what the table looks
//! like given observed peers.

mod domain;
mod errors;

pub use domain::bucket::{KBucket, MAX_OUTBOUND_PROTECTED, MAX_PER_SUBNET, K};
pub use domain::entry::NodeEntry;
pub use domain::lookup::NodeLookup;
pub use domain::subnet::{subnet_key, SubnetKey};
pub use domain::table::RoutingTable;
pub use errors::KademliaError;
