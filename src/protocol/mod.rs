//! Protocol module - wire format and framing.
//!
//! This module implements the length-prefixed framing used on the wire:
//! - 4-byte big-endian length prefix encoding/decoding
//! - Frame buffer for accumulating partial reads
//! - Helpers for building outgoing frames

mod frame;
mod frame_buffer;
mod wire_format;

pub(crate) use frame::payload_length;
pub use frame::{build_frame, build_frame_parts};
pub use frame_buffer::FrameBuffer;
pub use wire_format::{
    decode_length, encode_length, validate_length, DEFAULT_MAX_FRAME_SIZE, LENGTH_PREFIX_SIZE,
};
