//! Frame acquisition from a raw transport.
//!
//! Reads a 4-byte big-endian length prefix, then exactly that many payload
//! bytes, looping over short transport reads.
//!
//! # Example
//!
//! ```
//! use framed_reader::protocol::build_frame;
//! use framed_reader::source::{FrameSource, LengthPrefixedSource};
//! use framed_reader::transport::MemoryTransport;
//!
//! let wire = build_frame(b"payload").unwrap();
//! let mut source = LengthPrefixedSource::new(MemoryTransport::from(wire));
//! assert_eq!(&source.next_frame().unwrap()[..], b"payload");
//! ```

use bytes::{Bytes, BytesMut};

use super::FrameSource;
use crate::error::{FramedError, Result};
use crate::protocol::{decode_length, validate_length, DEFAULT_MAX_FRAME_SIZE, LENGTH_PREFIX_SIZE};
use crate::transport::Transport;

/// Frame source that pulls length-prefixed frames off a [`Transport`].
#[derive(Debug)]
pub struct LengthPrefixedSource<T> {
    transport: T,
    max_frame_size: u32,
}

impl<T: Transport> LengthPrefixedSource<T> {
    /// Create a source with the default max frame size.
    pub fn new(transport: T) -> Self {
        Self::with_max_frame_size(transport, DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a source with a custom max frame size.
    pub fn with_max_frame_size(transport: T, max_frame_size: u32) -> Self {
        Self {
            transport,
            max_frame_size,
        }
    }

    /// Maximum accepted frame payload size.
    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Get a reference to the underlying transport.
    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Unwrap the underlying transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Read exactly `length` bytes.
    ///
    /// A single transport read that returns everything is passed through
    /// without copying.
    fn read_exact(&mut self, length: usize) -> Result<Bytes> {
        let first = self.transport.read(length)?;
        if first.len() == length {
            return Ok(first);
        }

        let mut buf = BytesMut::with_capacity(length);
        let mut chunk = first;
        loop {
            if chunk.is_empty() {
                return Err(FramedError::ConnectionClosed);
            }
            buf.extend_from_slice(&chunk);
            if buf.len() == length {
                return Ok(buf.freeze());
            }
            chunk = self.transport.read(length - buf.len())?;
        }
    }
}

impl<T: Transport> FrameSource for LengthPrefixedSource<T> {
    fn next_frame(&mut self) -> Result<Bytes> {
        let prefix = self.read_exact(LENGTH_PREFIX_SIZE)?;
        let length = decode_length(&prefix).ok_or_else(|| {
            FramedError::Protocol(format!("Truncated length prefix ({} bytes)", prefix.len()))
        })?;
        validate_length(length, self.max_frame_size)?;

        self.read_exact(length as usize)
    }
}
