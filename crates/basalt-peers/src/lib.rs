//! Peer registry, lifecycle state machine, and reputation scoring
//! (spec.md §4.5). No networking lives here: wire handshakes are
//! `basalt-transport`'s concern, and routing/discovery is
//! `basalt-kademlia`'s — this crate only tracks what is known about each
//! peer once it is identified.

mod domain;
mod errors;

pub use domain::peer_id::PeerId;
pub use domain::peer_info::{PeerInfo, INITIAL_REPUTATION, MAX_REPUTATION, MIN_REPUTATION};
pub use domain::registry::PeerRegistry;
pub use domain::reputation::{PeerEvent, Scorer, LOW_REPUTATION_THRESHOLD};
pub use domain::state::PeerState;
pub use errors::PeerError;
