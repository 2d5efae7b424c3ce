//! Fixed-width byte array value types.
//!
//! `Hash256`, `Address`, `Signature`, `PublicKey`, `BlsPublicKey`, and
//! `BlsSignature` are all value-typed, equatable, hashable, fixed-width byte
//! arrays. They share one macro-generated implementation so each type's
//! hex rendering, parsing, and serde behavior can't drift from the others.
//!
//! Equality is constant-time (`subtle::ConstantTimeEq`) since these types
//! carry public keys and signatures that are compared on hot verification
//! paths; constant-time comparison costs nothing here and rules out a class
//! of timing side channels for free.

use crate::errors::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;

macro_rules! fixed_bytes_type {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Length in bytes of this type.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Build from a byte slice of exactly the expected length.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
                if bytes.len() != $len {
                    return Err(TypeError::WrongLength {
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }

            /// Borrow the underlying bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Canonical lowercase `0x`-prefixed hex rendering.
            pub fn to_hex(&self) -> String {
                let mut s = String::with_capacity(2 + $len * 2);
                s.push_str("0x");
                for byte in self.0.iter() {
                    s.push_str(&format!("{:02x}", byte));
                }
                s
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.ct_eq(&other.0).into()
            }
        }
        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let stripped = s.strip_prefix("0x").ok_or(TypeError::MissingPrefix)?;
                if stripped.len() != $len * 2 {
                    return Err(TypeError::WrongLength {
                        expected: $len * 2,
                        actual: stripped.len(),
                    });
                }
                let mut out = [0u8; $len];
                for (i, chunk) in stripped.as_bytes().chunks(2).enumerate() {
                    let hi = hex_nibble(chunk[0]).ok_or(TypeError::InvalidHex(i * 2))?;
                    let lo = hex_nibble(chunk[1]).ok_or(TypeError::InvalidHex(i * 2 + 1))?;
                    out[i] = (hi << 4) | lo;
                }
                Ok(Self(out))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse::<$name>().map_err(serde::de::Error::custom)
            }
        }
    };
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fixed_bytes_type!(Hash256, 32, "A 32-byte BLAKE3/content hash.");
fixed_bytes_type!(Address, 20, "A 20-byte account address.");
fixed_bytes_type!(Signature, 64, "A 64-byte Ed25519 signature.");
fixed_bytes_type!(PublicKey, 32, "A 32-byte Ed25519 public key.");
fixed_bytes_type!(BlsPublicKey, 48, "A 48-byte BLS12-381 G1 public key.");
fixed_bytes_type!(BlsSignature, 96, "A 96-byte BLS12-381 G2 signature.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let h = Hash256([0xAB; 32]);
        let s = h.to_hex();
        assert_eq!(s, format!("0x{}", "ab".repeat(32)));
        let parsed: Hash256 = s.parse().unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(
            "ab".repeat(32).parse::<Hash256>(),
            Err(TypeError::MissingPrefix)
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            "0xabcd".parse::<Hash256>(),
            Err(TypeError::WrongLength { .. })
        ));
    }

    #[test]
    fn address_from_slice() {
        let bytes = [7u8; 20];
        let addr = Address::from_slice(&bytes).unwrap();
        assert_eq!(addr.as_bytes(), &bytes);
        assert_eq!(Address::from_slice(&[0u8; 19]), Err(TypeError::WrongLength { expected: 20, actual: 19 }));
    }

    #[test]
    fn serde_roundtrip() {
        let pk = PublicKey([9u8; 32]);
        let json = serde_json::to_string(&pk).unwrap();
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(pk, back);
    }

    #[test]
    fn zero_is_default() {
        assert_eq!(Address::default(), Address::ZERO);
    }

    #[test]
    fn ordering_is_lexicographic_on_bytes() {
        let a = Hash256([0u8; 32]);
        let mut b = Hash256([0u8; 32]);
        b.0[31] = 1;
        assert!(a < b);
    }
}
