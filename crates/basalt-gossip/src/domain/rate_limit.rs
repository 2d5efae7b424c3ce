//! Per-peer IWANT rate limiting. `IHAVE`/`IWANT` let a peer probe what's
//! in the seen-message cache without ever receiving a payload, so without
//! a cap a peer could hammer `IWANT` as a cheap way to fingerprint cache
//! contents; this sliding window bounds how often any one peer gets
//! served.

use basalt_peers::PeerId;
use parking_lot::Mutex;
use std::collections::HashMap;

pub const DEFAULT_MAX_IWANT_PER_WINDOW: u32 = 30;
pub const DEFAULT_WINDOW_SECS: i64 = 10;

pub struct IWantRateLimiter {
    max_per_window: u32,
    window_secs: i64,
    records: Mutex<HashMap<PeerId, (u32, i64)>>,
}

impl Default for IWantRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IWANT_PER_WINDOW, DEFAULT_WINDOW_SECS)
    }
}

impl IWantRateLimiter {
    pub fn new(max_per_window: u32, window_secs: i64) -> Self {
        Self { max_per_window, window_secs, records: Mutex::new(HashMap::new()) }
    }

    /// Record one IWANT from `peer` at `now`; `true` if still within the
    /// window's budget, `false` if the peer should be refused.
    pub fn check_and_record(&self, peer: PeerId, now: i64) -> bool {
        let mut records = self.records.lock();
        let entry = records.entry(peer).or_insert((0, now));

        if now - entry.1 >= self.window_secs {
            entry.1 = now;
            entry.0 = 1;
            return true;
        }

        if entry.0 >= self.max_per_window {
            return false;
        }

        entry.0 += 1;
        true
    }
}
