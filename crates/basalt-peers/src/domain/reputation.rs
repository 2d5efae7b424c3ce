//! Reputation scoring (spec.md §4.5). Every observed peer interaction maps
//! to a signed delta against [`PeerInfo`]'s clamped `[0, 200]` score; two
//! decay rules pull the score back toward a neutral baseline between
//! interactions, and a rolling window caps how much credit rapid-fire
//! good behavior can earn.

use crate::domain::peer_info::PeerInfo;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Score floor below which `|delta| <= MINOR_PENALTY_CAP` penalties cannot
/// push a peer on their own — guards against a single flaky link earning
/// an accidental ban from a string of small, independently-harmless dings.
pub const LOW_REPUTATION_THRESHOLD: i32 = 30;
const MINOR_PENALTY_CAP: i32 = 5;

const DIMINISHING_WINDOW_SECS: i64 = 60;
const MAX_CREDITED_VALID_TX: usize = 10;
const MAX_CREDITED_VALID_BLOCK: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerEvent {
    ValidBlock,
    InvalidBlock,
    ValidTx,
    InvalidTx,
    ValidConsensusVote,
    InvalidConsensusVote,
    TimelyResponse,
    Timeout,
    ProtocolViolation,
    DuplicateMessage,
    HandshakeSuccess,
    HandshakeFailure,
    HeartbeatSuccess,
    HeartbeatFailure,
}

impl PeerEvent {
    /// Raw delta before the minor-penalty cap or diminishing-returns window
    /// are applied. `ProtocolViolation` is the one severe event that does
    /// not go through `delta()` at all — it bypasses scoring entirely and
    /// bans instantly (see [`Scorer::record`]).
    fn delta(self) -> i32 {
        match self {
            PeerEvent::ValidBlock => 5,
            PeerEvent::InvalidBlock => -50,
            PeerEvent::ValidTx => 1,
            PeerEvent::InvalidTx => -10,
            PeerEvent::ValidConsensusVote => 3,
            PeerEvent::InvalidConsensusVote => -30,
            PeerEvent::TimelyResponse => 2,
            PeerEvent::Timeout => -5,
            PeerEvent::ProtocolViolation => 0,
            PeerEvent::DuplicateMessage => -1,
            PeerEvent::HandshakeSuccess => 10,
            PeerEvent::HandshakeFailure => -15,
            PeerEvent::HeartbeatSuccess => 1,
            PeerEvent::HeartbeatFailure => -3,
        }
    }

    fn is_positive(self) -> bool {
        self.delta() > 0
    }
}

/// Per-peer scoring state that doesn't fit on [`PeerInfo`]'s atomics: the
/// diminishing-returns window and the active-recovery flag for negative
/// decay. Lives alongside a `PeerInfo` (one per peer), guarded by its own
/// lock at the call site since the window needs exclusive access to prune.
pub struct Scorer {
    valid_tx_window: VecDeque<i64>,
    valid_block_window: VecDeque<i64>,
    had_positive_since_decay: AtomicBool,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            valid_tx_window: VecDeque::new(),
            valid_block_window: VecDeque::new(),
            had_positive_since_decay: AtomicBool::new(false),
        }
    }

    /// Record `event` for `peer` at time `now` (unix seconds), applying the
    /// diminishing-returns window and the minor-penalty cap, and update
    /// `peer`'s clamped score in place.
    pub fn record(&mut self, peer: &PeerInfo, event: PeerEvent, now: i64) {
        if event == PeerEvent::ProtocolViolation {
            peer.ban(i64::MAX);
            return;
        }

        let delta = self.credited_delta(event, now);
        if delta == 0 {
            return;
        }

        if delta.abs() <= MINOR_PENALTY_CAP && delta < 0 {
            let current = peer.reputation();
            if current + delta < LOW_REPUTATION_THRESHOLD && current >= LOW_REPUTATION_THRESHOLD {
                // A minor penalty alone may not push a healthy peer below
                // the low-reputation line.
                peer.apply_reputation_delta(LOW_REPUTATION_THRESHOLD - current);
                return;
            }
        }

        peer.apply_reputation_delta(delta);
        if event.is_positive() {
            self.had_positive_since_decay.store(true, Ordering::Relaxed);
        }
    }

    fn credited_delta(&mut self, event: PeerEvent, now: i64) -> i32 {
        match event {
            PeerEvent::ValidTx => {
                prune_window(&mut self.valid_tx_window, now);
                if self.valid_tx_window.len() >= MAX_CREDITED_VALID_TX {
                    return 0;
                }
                self.valid_tx_window.push_back(now);
                event.delta()
            }
            PeerEvent::ValidBlock => {
                prune_window(&mut self.valid_block_window, now);
                if self.valid_block_window.len() >= MAX_CREDITED_VALID_BLOCK {
                    return 0;
                }
                self.valid_block_window.push_back(now);
                event.delta()
            }
            other => other.delta(),
        }
    }

    /// Apply one decay tick: score drifts toward 100 from above
    /// unconditionally (`-1`), and drifts up from below (`+1`) only if the
    /// peer had at least one positive interaction since the last tick
    /// ("active recovery" — an idle-but-silent peer does not self-heal).
    pub fn decay_tick(&self, peer: &PeerInfo) {
        let current = peer.reputation();
        if current > 100 {
            peer.apply_reputation_delta(-1);
        } else if current < 100 && self.had_positive_since_decay.swap(false, Ordering::Relaxed) {
            peer.apply_reputation_delta(1);
        } else {
            self.had_positive_since_decay.store(false, Ordering::Relaxed);
        }
    }
}

fn prune_window(window: &mut VecDeque<i64>, now: i64) {
    while let Some(&oldest) = window.front() {
        if now - oldest >= DIMINISHING_WINDOW_SECS {
            window.pop_front();
        } else {
            break;
        }
    }
}
