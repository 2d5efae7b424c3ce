//! Per-topic eager/lazy peer sets (spec.md §4.7, Episub). Eager peers get
//! the full message pushed to them on broadcast; lazy peers only get an
//! `IHAVE` announcement and must `IWANT` if they want the payload. `Graft`
//! promotes a lazy peer to eager and `Prune` does the reverse, both
//! bounded so the eager set can't grow without limit.

use basalt_peers::PeerId;
use std::collections::HashSet;

pub const TARGET_EAGER: usize = 6;
pub const MAX_EAGER: usize = 12;

#[derive(Default)]
pub struct TopicMesh {
    eager: HashSet<PeerId>,
    lazy: HashSet<PeerId>,
}

impl TopicMesh {
    pub fn new() -> Self {
        Self { eager: HashSet::new(), lazy: HashSet::new() }
    }

    pub fn eager_peers(&self) -> impl Iterator<Item = &PeerId> {
        self.eager.iter()
    }

    pub fn lazy_peers(&self) -> impl Iterator<Item = &PeerId> {
        self.lazy.iter()
    }

    pub fn eager_len(&self) -> usize {
        self.eager.len()
    }

    /// Add a peer to the topic; eager while there's room under
    /// [`TARGET_EAGER`], otherwise lazy.
    pub fn add_peer(&mut self, peer: PeerId) {
        if self.eager.contains(&peer) || self.lazy.contains(&peer) {
            return;
        }
        if self.eager.len() < TARGET_EAGER {
            self.eager.insert(peer);
        } else {
            self.lazy.insert(peer);
        }
    }

    pub fn remove_peer(&mut self, peer: &PeerId) {
        self.eager.remove(peer);
        self.lazy.remove(peer);
    }

    /// Promote a lazy peer to eager. No-op (returns `false`) if the eager
    /// set is already at [`MAX_EAGER`] or the peer isn't lazy.
    pub fn graft(&mut self, peer: PeerId) -> bool {
        if self.eager.len() >= MAX_EAGER || !self.lazy.remove(&peer) {
            return false;
        }
        self.eager.insert(peer);
        true
    }

    /// Demote an eager peer to lazy.
    pub fn prune(&mut self, peer: PeerId) -> bool {
        if !self.eager.remove(&peer) {
            return false;
        }
        self.lazy.insert(peer);
        true
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.eager.contains(peer) || self.lazy.contains(peer)
    }
}
