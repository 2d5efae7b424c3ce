//! `Writer`: an owned, growable byte buffer with little-endian fixed-width
//! integer writes and bounded length-prefixed fields.

use crate::errors::CodecError;
use crate::varint::encode_varint;
use crate::{MAX_BYTES_LENGTH, MAX_STRING_LENGTH};

/// A byte buffer under construction.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Start a new, empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Start a new writer with pre-reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Write a little-endian `u32`.
    pub fn write_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write a little-endian `u64`.
    pub fn write_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write a little-endian `i64`.
    pub fn write_i64_le(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write a big-endian fixed-width field exactly as given (no length
    /// prefix) — used for the wire's fixed 20/32/64/96-byte identity fields.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a minimal-encoding LEB128 `VarInt`.
    pub fn write_varint(&mut self, v: u64) {
        self.buf.extend_from_slice(&encode_varint(v));
    }

    /// Write `VarInt(len(bytes))` followed by `bytes`, rejecting lengths
    /// above `MaxBytesLength`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.write_length_prefixed(bytes, MAX_BYTES_LENGTH)
    }

    /// Write a UTF-8 string as `VarInt(len) ‖ utf8 bytes`, rejecting lengths
    /// above `MaxStringLength`.
    pub fn write_string(&mut self, s: &str) -> Result<(), CodecError> {
        self.write_length_prefixed(s.as_bytes(), MAX_STRING_LENGTH)
    }

    /// Write a length-prefixed field with a caller-supplied maximum —
    /// used for wire fields with their own bespoke cap (e.g.
    /// `MaxComplianceProofs`).
    pub fn write_length_prefixed(&mut self, bytes: &[u8], max: usize) -> Result<(), CodecError> {
        if bytes.len() as u64 > max as u64 {
            return Err(CodecError::OversizeLengthPrefix {
                declared: bytes.len() as u64,
                max: max as u64,
            });
        }
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Consume the writer, returning the finished buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Borrow the buffer written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}
