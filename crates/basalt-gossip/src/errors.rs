//! Gossip mesh failure modes (spec.md §4.7).

use basalt_chain::MessageId;
use basalt_peers::PeerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GossipError {
    #[error("IWANT from {peer:?} for {msg_id:?} was never preceded by an IHAVE to that peer")]
    UnsolicitedIWant { peer: PeerId, msg_id: MessageId },

    #[error("peer {0:?} exceeded its IWANT rate limit")]
    IWantRateLimited(PeerId),

    #[error("unknown topic {0:?}")]
    UnknownTopic(String),
}
