//! Peer registry failure modes (spec.md §4.5).

use crate::domain::peer_id::PeerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeerError {
    #[error("peer {0:?} is currently banned")]
    Banned(PeerId),

    #[error("connected-peer capacity reached ({0})")]
    CapacityReached(usize),

    #[error("peer {0:?} is not registered")]
    UnknownPeer(PeerId),

    #[error("peer {0:?} is already registered")]
    AlreadyRegistered(PeerId),
}
