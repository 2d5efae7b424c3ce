//! Wire framing (spec.md §4.8): every message on the channel is a 4-byte
//! big-endian length prefix followed by that many bytes. Pure length-check
//! logic lives here; the actual socket I/O lives in `adapters::tcp`.

use crate::errors::TransportError;

/// Frames above this size are rejected on receipt and refused on send.
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

/// Validate a frame length declared by a peer. Zero-length frames are
/// rejected alongside oversize ones — there is no empty Basalt message.
pub fn check_frame_len(declared: u32) -> Result<(), TransportError> {
    if declared == 0 || declared > MAX_FRAME_LEN {
        return Err(TransportError::FrameTooLarge {
            declared,
            max: MAX_FRAME_LEN,
        });
    }
    Ok(())
}

/// Prefix `payload` with its big-endian `u32` length, erroring if the
/// payload itself is already over the cap.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, TransportError> {
    if payload.is_empty() || payload.len() as u64 > MAX_FRAME_LEN as u64 {
        return Err(TransportError::MessageTooLarge { len: payload.len() });
    }
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_is_rejected() {
        assert!(check_frame_len(0).is_err());
    }

    #[test]
    fn oversize_length_is_rejected() {
        assert!(check_frame_len(MAX_FRAME_LEN + 1).is_err());
    }

    #[test]
    fn max_length_is_accepted() {
        assert!(check_frame_len(MAX_FRAME_LEN).is_ok());
    }

    #[test]
    fn encode_frame_prefixes_big_endian_length() {
        let framed = encode_frame(b"hello").unwrap();
        assert_eq!(&framed[..4], &5u32.to_be_bytes());
        assert_eq!(&framed[4..], b"hello");
    }

    #[test]
    fn encode_frame_rejects_empty_payload() {
        assert!(encode_frame(&[]).is_err());
    }
}
