//! `PeerInfo` (spec.md §4.5): identity, endpoint, lifecycle state, and
//! reputation for one remote peer. Scalar fields are individually atomic
//! so concurrent readers never block on a writer touching an unrelated
//! field; `best_block_number`/`best_block_hash` are the one exception —
//! they are updated together under a dedicated lock so no reader can ever
//! observe a height paired with the wrong hash.

use crate::domain::peer_id::PeerId;
use crate::domain::state::PeerState;
use basalt_types::{Hash256, PublicKey};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI32, AtomicI64, AtomicU8, Ordering};

pub const MIN_REPUTATION: i32 = 0;
pub const MAX_REPUTATION: i32 = 200;
pub const INITIAL_REPUTATION: i32 = 100;

/// One remote peer's tracked identity and live state.
pub struct PeerInfo {
    pub peer_id: PeerId,
    pub public_key: PublicKey,
    pub endpoint: String,
    state: AtomicU8,
    reputation: AtomicI32,
    last_seen: AtomicI64,
    connected_at: AtomicI64,
    /// Unix timestamp the ban lifts at; `0` means not banned.
    banned_until: AtomicI64,
    best_block: Mutex<(u64, Hash256)>,
}

impl PeerInfo {
    pub fn new(peer_id: PeerId, public_key: PublicKey, endpoint: String, now: i64) -> Self {
        Self {
            peer_id,
            public_key,
            endpoint,
            state: AtomicU8::new(PeerState::Disconnected.tag()),
            reputation: AtomicI32::new(INITIAL_REPUTATION),
            last_seen: AtomicI64::new(now),
            connected_at: AtomicI64::new(0),
            banned_until: AtomicI64::new(0),
            best_block: Mutex::new((0, Hash256::ZERO)),
        }
    }

    pub fn state(&self) -> PeerState {
        PeerState::from_tag(self.state.load(Ordering::Acquire))
    }

    /// Move to `next` if the lifecycle allows it; `false` if not (the
    /// state is left unchanged).
    pub fn transition_to(&self, next: PeerState) -> bool {
        let current = self.state();
        if !current.can_transition_to(next) {
            return false;
        }
        self.state.store(next.tag(), Ordering::Release);
        true
    }

    pub fn reputation(&self) -> i32 {
        self.reputation.load(Ordering::Relaxed)
    }

    pub fn is_banned(&self, now: i64) -> bool {
        self.state() == PeerState::Banned && self.banned_until.load(Ordering::Relaxed) > now
    }

    pub fn banned_until(&self) -> i64 {
        self.banned_until.load(Ordering::Relaxed)
    }

    pub fn last_seen(&self) -> i64 {
        self.last_seen.load(Ordering::Relaxed)
    }

    pub fn touch(&self, now: i64) {
        self.last_seen.store(now, Ordering::Relaxed);
    }

    pub fn connected_at(&self) -> i64 {
        self.connected_at.load(Ordering::Relaxed)
    }

    pub fn mark_connected(&self, now: i64) {
        self.connected_at.store(now, Ordering::Relaxed);
    }

    pub fn best_block(&self) -> (u64, Hash256) {
        *self.best_block.lock()
    }

    pub fn set_best_block(&self, number: u64, hash: Hash256) {
        *self.best_block.lock() = (number, hash);
    }

    /// Apply a signed reputation delta, clamping to `[0, 200]`.
    pub(crate) fn apply_reputation_delta(&self, delta: i32) {
        self.reputation
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + delta).clamp(MIN_REPUTATION, MAX_REPUTATION))
            })
            .expect("clamping closure always returns Some");
    }

    pub(crate) fn ban(&self, until: i64) {
        self.reputation.store(0, Ordering::Release);
        self.banned_until.store(until, Ordering::Release);
        self.state.store(PeerState::Banned.tag(), Ordering::Release);
        tracing::warn!(peer_id = ?self.peer_id, until, "peer banned");
    }
}
