//! A peer's 256-bit identity (spec.md §4.6). Wraps [`Hash256`] rather than
//! reusing it bare — a peer id is never a content hash of anything, and
//! the wrapper keeps the two from being accidentally interchanged.

use basalt_types::Hash256;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId(pub Hash256);

impl PeerId {
    pub fn xor_distance(&self, other: &PeerId) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = self.0 .0[i] ^ other.0 .0[i];
        }
        out
    }

    /// Index of the highest set bit in `xor_distance`, i.e. which Kademlia
    /// bucket `other` belongs in relative to `self`. `None` for identical
    /// ids (distance zero has no "highest set bit").
    pub fn bucket_index(&self, other: &PeerId) -> Option<usize> {
        let distance = self.xor_distance(other);
        for (byte_index, byte) in distance.iter().enumerate() {
            if *byte != 0 {
                let bit_in_byte = 7 - byte.leading_zeros() as usize;
                return Some((31 - byte_index) * 8 + bit_in_byte);
            }
        }
        None
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.0.to_hex())
    }
}
