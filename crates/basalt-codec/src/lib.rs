//! # basalt-codec
//!
//! Deterministic binary codec used for every on-wire and on-disk encoding in
//! Basalt: `Writer`/`Reader` over byte buffers, minimal-encoding LEB128
//! `VarInt`, little-endian fixed-width integers, and bounded length-prefixed
//! bytes/strings.

pub mod errors;
pub mod reader;
pub mod varint;
pub mod writer;

pub use errors::CodecError;
pub use reader::Reader;
pub use varint::{decode_varint, encode_varint};
pub use writer::Writer;

/// Maximum length of a length-prefixed `bytes` field (16 MiB).
pub const MAX_BYTES_LENGTH: usize = 16 * 1024 * 1024;

/// Maximum length of a length-prefixed `string` field.
pub const MAX_STRING_LENGTH: usize = 4096;
