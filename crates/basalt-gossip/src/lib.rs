//! Episub gossip mesh (spec.md §4.7): eager/lazy peer sets per topic,
//! IHAVE/IWANT with origin correlation, graft/prune mesh maintenance, a
//! bounded seen-message cache, and per-peer IWANT rate limiting. Framing
//! and encryption of the messages this crate decides to send live in
//! `basalt-transport`; this crate only decides *who* gets *what*.

mod domain;
mod errors;

pub use domain::fanout::{select_fanout, MAX_FAN_OUT};
pub use domain::mesh::{TopicMesh, MAX_EAGER, TARGET_EAGER};
pub use domain::rate_limit::{IWantRateLimiter, DEFAULT_MAX_IWANT_PER_WINDOW, DEFAULT_WINDOW_SECS};
pub use domain::router::{BroadcastPlan, Router};
pub use domain::seen_cache::{SeenCache, MAX_ENTRIES, TTL_SECS};
pub use errors::GossipError;
