//! Transport adapter for blocking `std::io::Read` sources.

use std::io::{ErrorKind, Read};

use bytes::Bytes;

use super::Transport;
use crate::error::{FramedError, Result};

/// Wraps any `std::io::Read` (socket, pipe, file) as a [`Transport`].
///
/// `read` performs a single underlying read, so it returns whatever the
/// source produced, possibly fewer bytes than requested. Interrupted reads
/// are retried.
#[derive(Debug)]
pub struct IoTransport<R> {
    inner: R,
}

impl<R: Read> IoTransport<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Transport for IoTransport<R> {
    fn read(&mut self, length: usize) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let mut buf = vec![0u8; length];
        let n = loop {
            match self.inner.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => FramedError::ConnectionClosed,
            _ => FramedError::Io(e),
        })?;
        Ok(byte[0])
    }
}
