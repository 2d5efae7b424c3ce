//! A single routing-table entry: a peer id plus the bookkeeping the
//! bucket needs to order and protect it.

use crate::domain::subnet::{subnet_key, SubnetKey};
use basalt_peers::PeerId;
use std::net::IpAddr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeEntry {
    pub peer_id: PeerId,
    pub addr: IpAddr,
    pub last_seen: i64,
    /// Outbound-protected entries (spec.md §4.6) are exempt from the
    /// full-bucket newcomer-rejection rule's eviction path — nothing ever
    /// evicts them while this is set. They are still counted against the
    /// bucket's overall capacity.
    pub outbound_protected: bool,
}

impl NodeEntry {
    pub fn subnet(&self) -> SubnetKey {
        subnet_key(&self.addr)
    }
}
