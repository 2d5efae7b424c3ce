//! Episub message router (spec.md §4.7): ties the per-topic mesh, the
//! seen-message cache, and IWANT authorization together into the
//! broadcast/IHAVE/IWANT/graft/prune surface a gossip adapter calls into.

use crate::domain::fanout::select_fanout;
use crate::domain::mesh::TopicMesh;
use crate::domain::rate_limit::IWantRateLimiter;
use crate::domain::seen_cache::SeenCache;
use crate::errors::GossipError;
use basalt_chain::MessageId;
use basalt_peers::PeerId;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// What a broadcast should do with a message: push the full payload to
/// `push` peers, and announce-only (`IHAVE`) to `announce` peers.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BroadcastPlan {
    pub push: Vec<PeerId>,
    pub announce: Vec<PeerId>,
}

pub struct Router {
    meshes: Mutex<HashMap<String, TopicMesh>>,
    seen: SeenCache,
    /// `(msg_id, peer)` pairs we've sent an IHAVE for — an IWANT is only
    /// honored if it matches one of these, so a peer can't probe for
    /// messages it was never told about.
    iwant_authorized: Mutex<HashSet<(MessageId, PeerId)>>,
    iwant_limiter: IWantRateLimiter,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            meshes: Mutex::new(HashMap::new()),
            seen: SeenCache::new(),
            iwant_authorized: Mutex::new(HashSet::new()),
            iwant_limiter: IWantRateLimiter::default(),
        }
    }

    pub fn join_topic(&self, topic: &str, peer: PeerId) {
        self.meshes.lock().entry(topic.to_string()).or_default().add_peer(peer);
    }

    pub fn leave_topic(&self, topic: &str, peer: &PeerId) {
        if let Some(mesh) = self.meshes.lock().get_mut(topic) {
            mesh.remove_peer(peer);
        }
    }

    pub fn graft(&self, topic: &str, peer: PeerId) -> bool {
        self.meshes.lock().entry(topic.to_string()).or_default().graft(peer)
    }

    pub fn prune(&self, topic: &str, peer: PeerId) -> bool {
        self.meshes.lock().entry(topic.to_string()).or_default().prune(peer)
    }

    /// Originate or relay `msg_id` on `topic`. Returns `None` if this
    /// message was already seen (nothing to do); otherwise a plan of who
    /// to push the full payload to and who to just announce to.
    pub fn broadcast(&self, topic: &str, msg_id: MessageId, now: i64) -> Option<BroadcastPlan> {
        if !self.seen.insert_if_new(msg_id, now) {
            return None;
        }

        let meshes = self.meshes.lock();
        let Some(mesh) = meshes.get(topic) else {
            return Some(BroadcastPlan::default());
        };

        let push: Vec<PeerId> = mesh.eager_peers().copied().collect();
        let announce: Vec<PeerId> = mesh.lazy_peers().copied().collect();
        drop(meshes);

        let mut authorized = self.iwant_authorized.lock();
        for peer in &announce {
            authorized.insert((msg_id, *peer));
        }

        Some(BroadcastPlan { push, announce })
    }

    /// Fallback fan-out to peers with no mesh relationship on `topic`
    /// (e.g. before the mesh has converged).
    pub fn fanout<R: Rng>(&self, topic: &str, candidates: &[PeerId], rng: &mut R) -> Vec<PeerId> {
        let meshes = self.meshes.lock();
        let meshed: HashSet<PeerId> = meshes
            .get(topic)
            .map(|m| m.eager_peers().chain(m.lazy_peers()).copied().collect())
            .unwrap_or_default();
        drop(meshes);

        let outside: Vec<PeerId> = candidates.iter().filter(|p| !meshed.contains(p)).copied().collect();
        select_fanout(&outside, rng)
    }

    /// A peer announced having `msg_id` via IHAVE; returns whether we
    /// should send it an IWANT (we don't already have the message).
    pub fn handle_ihave(&self, msg_id: MessageId, now: i64) -> bool {
        !self.seen.contains(&msg_id, now)
    }

    /// Whether an IWANT from `peer` for `msg_id` is authorized (it must
    /// correspond to a prior IHAVE we sent) and within its rate budget.
    pub fn handle_iwant(&self, peer: PeerId, msg_id: MessageId, now: i64) -> Result<(), GossipError> {
        if !self.iwant_limiter.check_and_record(peer, now) {
            return Err(GossipError::IWantRateLimited(peer));
        }
        let authorized = self.iwant_authorized.lock();
        if !authorized.contains(&(msg_id, peer)) {
            tracing::warn!(?peer, ?msg_id, "rejected unsolicited IWANT");
            return Err(GossipError::UnsolicitedIWant { peer, msg_id });
        }
        Ok(())
    }

    pub fn is_duplicate(&self, msg_id: MessageId, now: i64) -> bool {
        !self.seen.insert_if_new(msg_id, now)
    }
}
