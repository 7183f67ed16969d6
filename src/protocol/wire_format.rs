//! Wire format encoding and decoding.
//!
//! Every frame is a 4-byte length prefix followed by the payload:
//! ```text
//! ┌──────────────┬──────────────────────┐
//! │ Length       │ Payload              │
//! │ 4 bytes      │ `Length` bytes       │
//! │ uint32 BE    │                      │
//! └──────────────┴──────────────────────┘
//! ```

use crate::error::{FramedError, Result};

/// Length prefix size in bytes (fixed, exactly 4).
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum frame payload size (~16 MB).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16_384_000;

/// Encode a payload length as a big-endian prefix.
///
/// # Example
///
/// ```
/// use framed_reader::protocol::encode_length;
///
/// assert_eq!(encode_length(258), [0, 0, 1, 2]);
/// ```
#[inline]
pub fn encode_length(length: u32) -> [u8; LENGTH_PREFIX_SIZE] {
    length.to_be_bytes()
}

/// Decode a big-endian length prefix.
///
/// Returns `None` if buffer is too short.
///
/// # Example
///
/// ```
/// use framed_reader::protocol::decode_length;
///
/// assert_eq!(decode_length(&[0, 0, 0, 5, 0xFF]), Some(5));
/// assert_eq!(decode_length(&[0, 0, 0]), None);
/// ```
#[inline]
pub fn decode_length(buf: &[u8]) -> Option<u32> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return None;
    }
    Some(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]))
}

/// Reject a decoded length above `max_frame_size`.
pub fn validate_length(length: u32, max_frame_size: u32) -> Result<()> {
    if length > max_frame_size {
        tracing::warn!(
            "Rejecting frame of {} bytes (maximum {})",
            length,
            max_frame_size
        );
        return Err(FramedError::FrameTooLarge {
            size: length,
            max: max_frame_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_big_endian_byte_order() {
        let bytes = encode_length(0x01020304);
        assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_decode_reads_only_prefix() {
        let buf = [0x00, 0x00, 0x01, 0x00, 0xAA, 0xBB];
        assert_eq!(decode_length(&buf), Some(256));
    }

    #[test]
    fn test_decode_too_short_buffer() {
        assert!(decode_length(&[0u8; 3]).is_none());
        assert!(decode_length(&[]).is_none());
    }

    #[test]
    fn test_prefix_size_is_exactly_4() {
        assert_eq!(LENGTH_PREFIX_SIZE, 4);
        assert_eq!(encode_length(0).len(), 4);
    }

    #[test]
    fn test_validate_at_limit_is_ok() {
        assert!(validate_length(100, 100).is_ok());
        assert!(validate_length(0, 0).is_ok());
    }

    #[test]
    fn test_validate_over_limit() {
        let err = validate_length(101, 100).unwrap_err();
        assert!(matches!(
            err,
            FramedError::FrameTooLarge { size: 101, max: 100 }
        ));
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_max_values() {
        assert_eq!(decode_length(&encode_length(u32::MAX)), Some(u32::MAX));
    }
}
