//! Trie node shapes and their canonical encoding (spec.md §3, §4.3).

use crate::errors::TrieError;
use crate::nibbles::{decode_hex_prefix, encode_hex_prefix};
use basalt_codec::{Reader, Writer};
use basalt_types::Hash256;

const TAG_LEAF: u8 = 1;
const TAG_EXTENSION: u8 = 2;
const TAG_BRANCH: u8 = 3;

/// One of the four trie node shapes. `Empty` is never encoded or stored —
/// it is represented by the caller holding no root hash for that subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Terminal node: remaining path nibbles plus the stored value.
    Leaf { path: Vec<u8>, value: Vec<u8> },
    /// Shared-prefix optimization: remaining path nibbles plus a child hash.
    Extension { path: Vec<u8>, child: Hash256 },
    /// 16-way branch plus an optional value for keys ending exactly here.
    Branch {
        children: [Option<Hash256>; 16],
        value: Option<Vec<u8>>,
    },
}

impl Node {
    /// Number of live slots in a branch (children + value). Used by the
    /// collapse invariant: a branch must always have ≥2 live slots.
    pub fn branch_live_slots(children: &[Option<Hash256>; 16], value: &Option<Vec<u8>>) -> usize {
        children.iter().filter(|c| c.is_some()).count() + value.is_some() as usize
    }

    /// Canonical byte encoding of this node.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        match self {
            Node::Leaf { path, value } => {
                w.write_u8(TAG_LEAF);
                let hp = encode_hex_prefix(path, true);
                w.write_bytes(&hp).expect("hex-prefix path within bounds");
                w.write_bytes(value).expect("leaf value within bounds");
            }
            Node::Extension { path, child } => {
                w.write_u8(TAG_EXTENSION);
                let hp = encode_hex_prefix(path, false);
                w.write_bytes(&hp).expect("hex-prefix path within bounds");
                w.write_raw(child.as_bytes());
            }
            Node::Branch { children, value } => {
                w.write_u8(TAG_BRANCH);
                let mut bitmap: u16 = 0;
                for (i, child) in children.iter().enumerate() {
                    if child.is_some() {
                        bitmap |= 1 << (15 - i);
                    }
                }
                w.write_u8((bitmap >> 8) as u8);
                w.write_u8((bitmap & 0xFF) as u8);
                for child in children.iter().flatten() {
                    w.write_raw(child.as_bytes());
                }
                match value {
                    Some(v) => {
                        w.write_u8(1);
                        w.write_bytes(v).expect("branch value within bounds");
                    }
                    None => w.write_u8(0),
                }
            }
        }
        w.into_vec()
    }

    /// Decode a node from its canonical encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, TrieError> {
        let mut r = Reader::new(bytes);
        let tag = r
            .read_u8()
            .map_err(|e| TrieError::MalformedNode(e.to_string()))?;
        match tag {
            TAG_LEAF => {
                let hp = r.read_bytes().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                let (path, is_leaf) = decode_hex_prefix(&hp)
                    .ok_or_else(|| TrieError::MalformedNode("bad hex-prefix path".into()))?;
                if !is_leaf {
                    return Err(TrieError::MalformedNode("leaf tag with extension flag".into()));
                }
                let value = r.read_bytes().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                Ok(Node::Leaf { path, value })
            }
            TAG_EXTENSION => {
                let hp = r.read_bytes().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                let (path, is_leaf) = decode_hex_prefix(&hp)
                    .ok_or_else(|| TrieError::MalformedNode("bad hex-prefix path".into()))?;
                if is_leaf {
                    return Err(TrieError::MalformedNode("extension tag with leaf flag".into()));
                }
                let child_bytes = r
                    .read_fixed::<32>()
                    .map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                Ok(Node::Extension {
                    path,
                    child: Hash256(child_bytes),
                })
            }
            TAG_BRANCH => {
                let hi = r.read_u8().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                let lo = r.read_u8().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                let bitmap = ((hi as u16) << 8) | lo as u16;
                let mut children: [Option<Hash256>; 16] = Default::default();
                for i in 0..16 {
                    if bitmap & (1 << (15 - i)) != 0 {
                        let bytes = r
                            .read_fixed::<32>()
                            .map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                        children[i] = Some(Hash256(bytes));
                    }
                }
                let has_value = r.read_u8().map_err(|e| TrieError::MalformedNode(e.to_string()))?;
                let value = match has_value {
                    0 => None,
                    1 => Some(r.read_bytes().map_err(|e| TrieError::MalformedNode(e.to_string()))?),
                    other => {
                        return Err(TrieError::MalformedNode(format!(
                            "invalid has_value flag {other}"
                        )))
                    }
                };
                let live = Node::branch_live_slots(&children, &value);
                if live < 2 {
                    return Err(TrieError::MalformedNode(
                        "branch with fewer than 2 live slots".into(),
                    ));
                }
                Ok(Node::Branch { children, value })
            }
            other => Err(TrieError::MalformedNode(format!("unknown node tag {other}"))),
        }
    }

    /// BLAKE3 hash of this node's canonical encoding — the node's identity
    /// in the content-addressed store.
    pub fn hash(&self) -> Hash256 {
        basalt_crypto::blake3_hash(&self.encode())
    }
}
