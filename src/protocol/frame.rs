//! Outgoing frame construction.
//!
//! Helpers that prepend the length prefix to a payload, either into one
//! contiguous buffer or as separate parts for vectored writes.

use crate::error::{FramedError, Result};

use super::wire_format::{encode_length, LENGTH_PREFIX_SIZE};

/// Payload length as a wire `u32`.
///
/// Fails if the payload cannot be described by a 4-byte prefix.
pub(crate) fn payload_length(payload: &[u8]) -> Result<u32> {
    u32::try_from(payload.len()).map_err(|_| {
        FramedError::Protocol(format!(
            "Payload of {} bytes does not fit a length prefix",
            payload.len()
        ))
    })
}

/// Build a complete frame as a single byte vector.
///
/// Use `build_frame_parts` for scatter/gather I/O (writev).
///
/// # Example
///
/// ```
/// use framed_reader::protocol::build_frame;
///
/// let bytes = build_frame(b"hello").unwrap();
/// assert_eq!(bytes, [0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']);
/// ```
pub fn build_frame(payload: &[u8]) -> Result<Vec<u8>> {
    let length = payload_length(payload)?;
    let mut buf = Vec::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    buf.extend_from_slice(&encode_length(length));
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Build frame parts for scatter/gather I/O.
///
/// Returns the encoded prefix and a reference to the payload.
pub fn build_frame_parts(payload: &[u8]) -> Result<([u8; LENGTH_PREFIX_SIZE], &[u8])> {
    Ok((encode_length(payload_length(payload)?), payload))
}
