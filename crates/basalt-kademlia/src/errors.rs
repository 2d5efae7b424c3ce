//! Routing-table failure modes (spec.md §4.6).

use basalt_peers::PeerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KademliaError {
    #[error("bucket {0} is full and rejects new peers while at capacity")]
    BucketFull(usize),

    #[error("peer {0:?} would exceed the IP-diversity cap for its subnet")]
    SubnetCapReached(PeerId),

    #[error("peer {0:?} is not present in the routing table")]
    UnknownPeer(PeerId),

    #[error("cannot insert the local node id into its own routing table")]
    SelfInsertion,

    #[error("outbound-protected slots are full ({0})")]
    OutboundSlotsFull(usize),
}
