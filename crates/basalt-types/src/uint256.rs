//! 256-bit unsigned integer with big-endian wire semantics.
//!
//! Wraps `primitive_types::U256`. On the wire `UInt256` is always 32
//! big-endian bytes (spec.md §3); in memory, arithmetic is checked — callers
//! choose whether an overflow should fail the operation (`checked_*`) or be
//! impossible by construction (`saturating_*`), per spec.md's "checked and
//! saturate-or-fail" wording.

use crate::errors::TypeError;
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 256-bit unsigned integer, wire-encoded as 32 big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UInt256(pub U256);

impl UInt256 {
    /// The zero value.
    pub const ZERO: Self = Self(U256::zero());

    /// Construct from a `u64`.
    pub fn from_u64(v: u64) -> Self {
        Self(U256::from(v))
    }

    /// Construct from exactly 32 big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Self(U256::from_big_endian(bytes))
    }

    /// Construct from a big-endian byte slice, erroring if it's not 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        if bytes.len() != 32 {
            return Err(TypeError::WrongLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        Ok(Self(U256::from_big_endian(bytes)))
    }

    /// Serialize to 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction; `None` on underflow.
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked multiplication; `None` on overflow.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Self)
    }

    /// Saturating addition, clamped to `U256::MAX`.
    pub fn saturating_add(&self, rhs: &Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction, clamped to zero.
    pub fn saturating_sub(&self, rhs: &Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({})", self.0)
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UInt256 {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl Serialize for UInt256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = self.to_be_bytes();
        let mut hex = String::with_capacity(66);
        hex.push_str("0x");
        for b in bytes.iter() {
            hex.push_str(&format!("{:02x}", b));
        }
        serializer.serialize_str(&hex)
    }
}

impl<'de> Deserialize<'de> for UInt256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex_decode(stripped).map_err(serde::de::Error::custom)?;
        if bytes.len() > 32 {
            return Err(serde::de::Error::custom("UInt256 hex too long"));
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(UInt256::from_be_bytes(&padded))
    }
}

fn hex_decode(s: &str) -> Result<Vec<u8>, String> {
    if s.len() % 2 != 0 {
        return Err("odd-length hex string".into());
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let bytes = s.as_bytes();
    for chunk in bytes.chunks(2) {
        let hi = (chunk[0] as char)
            .to_digit(16)
            .ok_or("invalid hex digit")?;
        let lo = (chunk[1] as char)
            .to_digit(16)
            .ok_or("invalid hex digit")?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}
