//! Connected-peer bookkeeping (spec.md §4.5): enforces a capacity cap on
//! `Connected` peers, rejects registering an already-banned peer, and
//! prunes stale entries so the map doesn't grow unbounded.

use crate::domain::peer_id::PeerId;
use crate::domain::peer_info::PeerInfo;
use crate::domain::state::PeerState;
use crate::errors::PeerError;
use basalt_types::PublicKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// How long a `Disconnected` peer may sit in the registry before it is
/// pruned. A `Banned` peer is pruned as soon as `banned_until` elapses.
const STALE_DISCONNECTED_SECS: i64 = 3600;

pub struct PeerRegistry {
    max_connected: usize,
    peers: RwLock<HashMap<PeerId, Arc<PeerInfo>>>,
}

impl PeerRegistry {
    pub fn new(max_connected: usize) -> Self {
        Self { max_connected, peers: RwLock::new(HashMap::new()) }
    }

    pub fn connected_count(&self, now: i64) -> usize {
        self.peers
            .read()
            .values()
            .filter(|p| p.state() == PeerState::Connected && !p.is_banned(now))
            .count()
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<Arc<PeerInfo>> {
        self.peers.read().get(peer_id).cloned()
    }

    /// Register a new peer. Fails if the peer is already known, or if the
    /// registry is at its connected-peer capacity.
    pub fn register(
        &self,
        peer_id: PeerId,
        public_key: PublicKey,
        endpoint: String,
        now: i64,
    ) -> Result<Arc<PeerInfo>, PeerError> {
        let mut peers = self.peers.write();
        if let Some(existing) = peers.get(&peer_id) {
            let expired_ban = existing.state() == PeerState::Banned && !existing.is_banned(now);
            if !expired_ban {
                return Err(PeerError::AlreadyRegistered(peer_id));
            }
            // The ban has lapsed: drop the stale entry and let registration
            // proceed as if the peer were new, clearing `banned_until`.
            peers.remove(&peer_id);
        }
        let connected = peers
            .values()
            .filter(|p| p.state() == PeerState::Connected && !p.is_banned(now))
            .count();
        if connected >= self.max_connected {
            return Err(PeerError::CapacityReached(self.max_connected));
        }
        let info = Arc::new(PeerInfo::new(peer_id, public_key, endpoint.clone(), now));
        peers.insert(peer_id, info.clone());
        tracing::debug!(?peer_id, endpoint, "peer registered");
        Ok(info)
    }

    pub fn require(&self, peer_id: &PeerId) -> Result<Arc<PeerInfo>, PeerError> {
        self.get(peer_id).ok_or(PeerError::UnknownPeer(*peer_id))
    }

    pub fn remove(&self, peer_id: &PeerId) {
        self.peers.write().remove(peer_id);
    }

    /// Drop entries that have been `Disconnected` for longer than
    /// [`STALE_DISCONNECTED_SECS`], or whose ban has elapsed.
    pub fn prune_stale(&self, now: i64) {
        let mut peers = self.peers.write();
        let before = peers.len();
        peers.retain(|_, p| match p.state() {
            PeerState::Disconnected => now - p.last_seen() < STALE_DISCONNECTED_SECS,
            PeerState::Banned => p.banned_until() == i64::MAX || p.banned_until() > now,
            _ => true,
        });
        let pruned = before - peers.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned stale peer registry entries");
        }
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
