//! `Reader`: a borrowed cursor over an immutable byte buffer.

use crate::errors::CodecError;
use crate::varint::decode_varint;
use crate::{MAX_BYTES_LENGTH, MAX_STRING_LENGTH};

/// A cursor into a byte slice the caller owns.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Wrap `buf` starting at position 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes remaining after the cursor.
    pub fn remaining(&self) -> usize {
        // buf.len() >= pos always holds, so this never underflows.
        self.buf.len() - self.pos
    }

    fn ensure(&self, need: usize) -> Result<(), CodecError> {
        if need > self.remaining() {
            return Err(CodecError::ShortBuffer {
                need,
                have: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.ensure(1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> Result<u32, CodecError> {
        let bytes = self.read_fixed::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Read a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> Result<u64, CodecError> {
        let bytes = self.read_fixed::<8>()?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a little-endian `i64`.
    pub fn read_i64_le(&mut self) -> Result<i64, CodecError> {
        let bytes = self.read_fixed::<8>()?;
        Ok(i64::from_le_bytes(bytes))
    }

    /// Read exactly `N` raw bytes (fixed-width identity fields).
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Read exactly `n` raw bytes as a slice borrowed from the buffer.
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Read a minimal-encoding LEB128 `VarInt`.
    pub fn read_varint(&mut self) -> Result<u64, CodecError> {
        let (value, consumed) = decode_varint(&self.buf[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read `VarInt(len) ‖ bytes`, rejecting `len > MaxBytesLength`.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        self.read_length_prefixed(MAX_BYTES_LENGTH)
    }

    /// Read `VarInt(len) ‖ utf8 bytes`, rejecting `len > MaxStringLength` or
    /// invalid UTF-8.
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let bytes = self.read_length_prefixed(MAX_STRING_LENGTH)?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Read a length-prefixed field with a caller-supplied maximum.
    pub fn read_length_prefixed(&mut self, max: usize) -> Result<Vec<u8>, CodecError> {
        let len = self.read_varint()?;
        if len > max as u64 {
            return Err(CodecError::OversizeLengthPrefix {
                declared: len,
                max: max as u64,
            });
        }
        let slice = self.read_raw(len as usize)?;
        Ok(slice.to_vec())
    }

    /// Read a `VarInt` count, rejecting it if it exceeds `max_count` — used
    /// for bounded-cardinality wire fields (transaction lists, compliance
    /// proof lists) per spec.md §6.
    pub fn read_bounded_count(&mut self, max_count: u64) -> Result<u64, CodecError> {
        let count = self.read_varint()?;
        if count > max_count {
            return Err(CodecError::OversizeLengthPrefix {
                declared: count,
                max: max_count,
            });
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Writer;

    #[test]
    fn fixed_width_roundtrip() {
        let mut w = Writer::new();
        w.write_u8(7);
        w.write_u32_le(0xDEADBEEF);
        w.write_u64_le(0x0123456789ABCDEF);
        w.write_i64_le(-42);
        let buf = w.into_vec();

        let mut r = Reader::new(&buf);
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(r.read_u64_le().unwrap(), 0x0123456789ABCDEF);
        assert_eq!(r.read_i64_le().unwrap(), -42);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn bytes_and_string_roundtrip() {
        let mut w = Writer::new();
        w.write_bytes(b"payload").unwrap();
        w.write_string("hello basalt").unwrap();
        let buf = w.into_vec();

        let mut r = Reader::new(&buf);
        assert_eq!(r.read_bytes().unwrap(), b"payload");
        assert_eq!(r.read_string().unwrap(), "hello basalt");
    }

    #[test]
    fn short_buffer_does_not_panic() {
        let mut r = Reader::new(&[0x01]);
        assert!(matches!(r.read_u32_le(), Err(CodecError::ShortBuffer { .. })));
    }

    #[test]
    fn oversize_bytes_length_rejected() {
        let mut w = Writer::new();
        w.write_varint((MAX_BYTES_LENGTH as u64) + 1);
        let buf = w.into_vec();
        let mut r = Reader::new(&buf);
        assert!(matches!(
            r.read_bytes(),
            Err(CodecError::OversizeLengthPrefix { .. })
        ));
    }

    #[test]
    fn oversize_string_length_rejected() {
        let mut w = Writer::new();
        w.write_varint((MAX_STRING_LENGTH as u64) + 1);
        let buf = w.into_vec();
        let mut r = Reader::new(&buf);
        assert!(matches!(
            r.read_string(),
            Err(CodecError::OversizeLengthPrefix { .. })
        ));
    }

    #[test]
    fn bounded_count_enforced() {
        let mut w = Writer::new();
        w.write_varint(5);
        let buf = w.into_vec();
        let mut r = Reader::new(&buf);
        assert!(matches!(
            r.read_bounded_count(4),
            Err(CodecError::OversizeLengthPrefix { .. })
        ));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut w = Writer::new();
        w.write_bytes(&[0xFF, 0xFE]).unwrap();
        let buf = w.into_vec();
        let mut r = Reader::new(&buf);
        assert_eq!(r.read_string(), Err(CodecError::InvalidUtf8));
    }
}
