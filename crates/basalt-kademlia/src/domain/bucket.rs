//! A single k-bucket (spec.md §4.6): holds up to `K` peers at one XOR
//! distance range, ordered least- to most-recently-seen. Unlike
//! challenge-and-evict designs, a full bucket simply rejects newcomers —
//! there is no background liveness probe deciding who gets bumped.

use crate::domain::entry::NodeEntry;
use crate::errors::KademliaError;
use basalt_peers::PeerId;

pub const K: usize = 20;
pub const MAX_PER_SUBNET: usize = 2;
pub const MAX_OUTBOUND_PROTECTED: usize = 4;

#[derive(Default)]
pub struct KBucket {
    /// Front = least recently seen, back = most recently seen.
    entries: Vec<NodeEntry>,
}

impl KBucket {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= K
    }

    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.entries.iter().any(|e| &e.peer_id == peer_id)
    }

    pub fn oldest(&self) -> Option<&NodeEntry> {
        self.entries.first()
    }

    fn protected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outbound_protected).count()
    }

    fn subnet_count(&self, entry: &NodeEntry) -> usize {
        self.entries.iter().filter(|e| e.subnet() == entry.subnet()).count()
    }

    /// Insert a newcomer. Rejects if the bucket is full, or if the
    /// newcomer would push its `/24`/`/48` neighborhood past
    /// [`MAX_PER_SUBNET`]. If the peer is already present, this just
    /// touches it (refreshes position and `last_seen`) instead.
    pub fn insert(&mut self, entry: NodeEntry) -> Result<(), KademliaError> {
        if let Some(pos) = self.entries.iter().position(|e| e.peer_id == entry.peer_id) {
            let mut existing = self.entries.remove(pos);
            existing.last_seen = entry.last_seen;
            self.entries.push(existing);
            return Ok(());
        }

        if self.subnet_count(&entry) >= MAX_PER_SUBNET {
            tracing::debug!(peer_id = ?entry.peer_id, "rejected insertion, subnet cap reached");
            return Err(KademliaError::SubnetCapReached(entry.peer_id));
        }

        if self.is_full() {
            tracing::debug!(peer_id = ?entry.peer_id, "rejected insertion, bucket full");
            return Err(KademliaError::BucketFull(K));
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Mark an existing entry outbound-protected. Bounded by
    /// [`MAX_OUTBOUND_PROTECTED`] so protection itself can't be used to
    /// monopolize a bucket.
    pub fn protect_outbound(&mut self, peer_id: &PeerId) -> Result<(), KademliaError> {
        if self.protected_count() >= MAX_OUTBOUND_PROTECTED {
            return Err(KademliaError::OutboundSlotsFull(MAX_OUTBOUND_PROTECTED));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.peer_id == peer_id)
            .ok_or(KademliaError::UnknownPeer(*peer_id))?;
        entry.outbound_protected = true;
        Ok(())
    }

    pub fn touch(&mut self, peer_id: &PeerId, now: i64) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| &e.peer_id == peer_id) {
            let mut entry = self.entries.remove(pos);
            entry.last_seen = now;
            self.entries.push(entry);
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, peer_id: &PeerId) -> Option<NodeEntry> {
        self.entries.iter().position(|e| &e.peer_id == peer_id).map(|pos| self.entries.remove(pos))
    }
}
