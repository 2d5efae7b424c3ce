//! The routing table (spec.md §4.6): 256 k-buckets indexed by XOR-distance
//! bit-length from the local node id, one lock per bucket so lookups in
//! distant buckets never contend with inserts in nearby ones.

use crate::domain::bucket::KBucket;
use crate::domain::entry::NodeEntry;
use crate::errors::KademliaError;
use basalt_peers::PeerId;
use parking_lot::RwLock;
use std::net::IpAddr;

const NUM_BUCKETS: usize = 256;

pub struct RoutingTable {
    local_id: PeerId,
    buckets: Vec<RwLock<KBucket>>,
}

impl RoutingTable {
    pub fn new(local_id: PeerId) -> Self {
        let buckets = (0..NUM_BUCKETS).map(|_| RwLock::new(KBucket::new())).collect();
        Self { local_id, buckets }
    }

    pub fn local_id(&self) -> PeerId {
        self.local_id
    }

    fn bucket_index(&self, peer_id: &PeerId) -> Result<usize, KademliaError> {
        self.local_id.bucket_index(peer_id).ok_or(KademliaError::SelfInsertion)
    }

    pub fn insert(&self, peer_id: PeerId, addr: IpAddr, now: i64) -> Result<(), KademliaError> {
        let idx = self.bucket_index(&peer_id)?;
        let entry = NodeEntry { peer_id, addr, last_seen: now, outbound_protected: false };
        self.buckets[idx].write().insert(entry)
    }

    pub fn touch(&self, peer_id: &PeerId, now: i64) -> Result<bool, KademliaError> {
        let idx = self.bucket_index(peer_id)?;
        Ok(self.buckets[idx].write().touch(peer_id, now))
    }

    pub fn remove(&self, peer_id: &PeerId) -> Result<Option<NodeEntry>, KademliaError> {
        let idx = self.bucket_index(peer_id)?;
        Ok(self.buckets[idx].write().remove(peer_id))
    }

    pub fn protect_outbound(&self, peer_id: &PeerId) -> Result<(), KademliaError> {
        let idx = self.bucket_index(peer_id)?;
        self.buckets[idx].write().protect_outbound(peer_id)
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        match self.bucket_index(peer_id) {
            Ok(idx) => self.buckets[idx].read().contains(peer_id),
            Err(_) => false,
        }
    }

    pub fn total_peers(&self) -> usize {
        self.buckets.iter().map(|b| b.read().len()).sum()
    }

    pub fn buckets_in_use(&self) -> usize {
        self.buckets.iter().filter(|b| !b.read().is_empty()).count()
    }

    /// The `n` known peers closest to `target` by XOR distance, merged
    /// across every bucket and sorted ascending.
    pub fn find_closest(&self, target: &PeerId, n: usize) -> Vec<PeerId> {
        let mut candidates: Vec<(PeerId, [u8; 32])> = self
            .buckets
            .iter()
            .flat_map(|b| b.read().entries().iter().map(|e| e.peer_id).collect::<Vec<_>>())
            .map(|id| (id, id.xor_distance(target)))
            .collect();

        candidates.sort_by(|a, b| a.1.cmp(&b.1));
        candidates.into_iter().take(n).map(|(id, _)| id).collect()
    }
}
