//! Transport module - raw byte sources.
//!
//! Provides the primitives a framed reader falls back to in pass-through
//! mode and that frame sources pull length prefixes and payloads from:
//! - [`MemoryTransport`] - in-memory bytes (zero-copy reads)
//! - [`IoTransport`] - any `std::io::Read` (sockets, pipes, files)

mod io;
mod memory;

pub use io::IoTransport;
pub use memory::MemoryTransport;

use bytes::Bytes;

use crate::error::{FramedError, Result};

/// Raw byte transport primitives.
pub trait Transport {
    /// Read up to `length` bytes.
    ///
    /// Implementations may return fewer bytes than requested; an empty
    /// result means no data is currently available.
    fn read(&mut self, length: usize) -> Result<Bytes>;

    /// Read exactly one byte.
    fn read_byte(&mut self) -> Result<u8>;

    /// Copy `size` bytes into `dst`, starting at offset 0.
    ///
    /// Fails with `OutOfBounds`, reading nothing, if `size` exceeds `dst`.
    fn read_into_buffer(&mut self, dst: &mut [u8], size: usize) -> Result<usize> {
        if size > dst.len() {
            return Err(FramedError::OutOfBounds {
                index: dst.len(),
                capacity: dst.len(),
            });
        }
        for slot in &mut dst[..size] {
            *slot = self.read_byte()?;
        }
        Ok(size)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read(&mut self, length: usize) -> Result<Bytes> {
        (**self).read(length)
    }

    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    fn read_into_buffer(&mut self, dst: &mut [u8], size: usize) -> Result<usize> {
        (**self).read_into_buffer(dst, size)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read(&mut self, length: usize) -> Result<Bytes> {
        (**self).read(length)
    }

    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    fn read_into_buffer(&mut self, dst: &mut [u8], size: usize) -> Result<usize> {
        (**self).read_into_buffer(dst, size)
    }
}
