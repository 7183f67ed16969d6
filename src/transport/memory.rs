//! In-memory transport over a fixed byte buffer.
//!
//! # Example
//!
//! ```
//! use framed_reader::transport::{MemoryTransport, Transport};
//!
//! let mut transport = MemoryTransport::from_static(b"hello");
//! assert_eq!(&transport.read(3).unwrap()[..], b"hel");
//! assert_eq!(transport.read_byte().unwrap(), b'l');
//! ```

use bytes::Bytes;

use super::Transport;
use crate::error::{FramedError, Result};

/// Transport that serves reads from an in-memory `Bytes` value.
///
/// `read` returns zero-copy slices of the backing buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    data: Bytes,
    position: usize,
}

impl MemoryTransport {
    /// Create a transport reading from `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Create a transport over static bytes without copying.
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }

    /// Bytes not yet read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Check if all bytes have been read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl Transport for MemoryTransport {
    fn read(&mut self, length: usize) -> Result<Bytes> {
        let end = self.position + length.min(self.remaining());
        let chunk = self.data.slice(self.position..end);
        self.position = end;
        Ok(chunk)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(FramedError::ConnectionClosed)?;
        self.position += 1;
        Ok(byte)
    }
}

impl From<Vec<u8>> for MemoryTransport {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Bytes> for MemoryTransport {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}
