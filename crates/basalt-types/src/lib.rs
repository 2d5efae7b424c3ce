//! # basalt-types
//!
//! Fixed-width value types shared by every other Basalt crate: `Hash256`,
//! `Address`, `Signature`, `PublicKey`, `BlsPublicKey`, `BlsSignature`, and
//! `UInt256`. All are value-typed, equatable, hashable, and render as
//! lowercase `0x`-prefixed hex.
//!
//! ## Address derivation
//!
//! `Address` itself carries no derivation logic (that needs hashing, which
//! lives in `basalt-crypto` to avoid a dependency cycle); this crate only
//! defines the 20-byte container spec.md's address scheme fills in.

pub mod errors;
pub mod fixed;
pub mod uint256;

pub use errors::TypeError;
pub use fixed::{Address, BlsPublicKey, BlsSignature, Hash256, PublicKey, Signature};
pub use uint256::UInt256;
