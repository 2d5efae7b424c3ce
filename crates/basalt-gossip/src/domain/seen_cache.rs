//! Seen-message dedup cache (spec.md §4.7): bounds memory with both a
//! hard entry cap and a TTL, so a flood of distinct message ids can't
//! grow the cache forever and a slow trickle doesn't get stuck cached
//! past its relevance window. Cleanup is guarded by a CAS flag so
//! concurrent callers never run the sweep redundantly.

use basalt_chain::MessageId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

pub const MAX_ENTRIES: usize = 100_000;
pub const TTL_SECS: i64 = 60;

pub struct SeenCache {
    entries: Mutex<HashMap<MessageId, i64>>,
    cleaning: AtomicBool,
}

impl Default for SeenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SeenCache {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()), cleaning: AtomicBool::new(false) }
    }

    /// Record `msg_id` as seen at `now`. Returns `true` if this is the
    /// first time it's been seen (i.e. the caller should relay it),
    /// `false` if it's a duplicate within the TTL window.
    pub fn insert_if_new(&self, msg_id: MessageId, now: i64) -> bool {
        self.maybe_cleanup(now);
        let mut entries = self.entries.lock();
        if let Some(seen_at) = entries.get(&msg_id) {
            if now - *seen_at < TTL_SECS {
                return false;
            }
        }
        entries.insert(msg_id, now);
        true
    }

    /// Whether `msg_id` is currently cached as seen, without touching its
    /// timestamp or inserting it.
    pub fn contains(&self, msg_id: &MessageId, now: i64) -> bool {
        self.entries.lock().get(msg_id).is_some_and(|seen_at| now - *seen_at < TTL_SECS)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Only one caller at a time actually runs the sweep; others skip it
    /// and proceed, relying on the next insert to retry.
    fn maybe_cleanup(&self, now: i64) {
        let should_run = {
            let entries = self.entries.lock();
            entries.len() >= MAX_ENTRIES
        } || now % 30 == 0;

        if !should_run {
            return;
        }

        if self
            .cleaning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        {
            let mut entries = self.entries.lock();
            entries.retain(|_, seen_at| now - *seen_at < TTL_SECS);
            if entries.len() > MAX_ENTRIES {
                let overflow = entries.len() - MAX_ENTRIES;
                let victims: Vec<MessageId> = entries
                    .iter()
                    .collect::<Vec<_>>()
                    .into_iter()
                    .map(|(k, _)| *k)
                    .take(overflow)
                    .collect();
                for victim in victims {
                    entries.remove(&victim);
                }
            }
        }

        self.cleaning.store(false, Ordering::Release);
    }
}
