//! Iterative node lookup (spec.md §4.6): tracks which peers have already
//! been returned as a local candidate or already queried, so a lookup
//! converging over several rounds never re-visits or re-returns the same
//! node twice.

use basalt_peers::PeerId;
use std::collections::HashSet;

pub struct NodeLookup {
    target: PeerId,
    seen: HashSet<PeerId>,
    queried: HashSet<PeerId>,
}

impl NodeLookup {
    pub fn new(target: PeerId) -> Self {
        Self { target, seen: HashSet::new(), queried: HashSet::new() }
    }

    pub fn target(&self) -> PeerId {
        self.target
    }

    /// Fold in candidates surfaced by the local table or by a peer's
    /// response, returning only the ones not already seen this lookup.
    pub fn offer(&mut self, candidates: Vec<PeerId>) -> Vec<PeerId> {
        candidates.into_iter().filter(|c| self.seen.insert(*c)).collect()
    }

    pub fn mark_queried(&mut self, peer_id: PeerId) {
        self.queried.insert(peer_id);
    }

    pub fn is_queried(&self, peer_id: &PeerId) -> bool {
        self.queried.contains(peer_id)
    }

    pub fn unqueried<'a>(&self, candidates: &'a [PeerId]) -> Vec<&'a PeerId> {
        candidates.iter().filter(|c| !self.is_queried(c)).collect()
    }
}
