//! Write-side framing.
//!
//! [`FramedWriter`] collects everything written between flushes into one
//! outgoing frame. `flush()` emits the length prefix and the payload in a
//! single `write_all`, then flushes the inner writer.
//!
//! ```text
//! write("ab") ─┐
//! write("cd") ─┼─► [len=4 | a b c d] ─► inner.write_all ─► inner.flush
//! flush()     ─┘
//! ```

use std::io::{self, Write};

use bytes::BytesMut;

use crate::error::Result;
use crate::protocol::{encode_length, payload_length, LENGTH_PREFIX_SIZE};

/// Default capacity of the outgoing frame buffer.
pub const DEFAULT_WRITE_CAPACITY: usize = 4 * 1024;

/// Buffers writes into length-prefixed frames.
///
/// With framing disabled every write goes straight to the inner writer.
#[derive(Debug)]
pub struct FramedWriter<W: Write> {
    inner: W,
    /// Prefix placeholder followed by the pending payload.
    buffer: BytesMut,
    framing: bool,
}

impl<W: Write> FramedWriter<W> {
    /// Create a framing writer.
    pub fn new(inner: W) -> Self {
        Self::with_framing(inner, true)
    }

    /// Create a writer, optionally passing writes through unframed.
    pub fn with_framing(inner: W, framing: bool) -> Self {
        let mut buffer = BytesMut::with_capacity(DEFAULT_WRITE_CAPACITY);
        buffer.extend_from_slice(&[0u8; LENGTH_PREFIX_SIZE]);
        Self {
            inner,
            buffer,
            framing,
        }
    }

    /// Append bytes to the pending frame.
    pub fn write_frame_bytes(&mut self, data: &[u8]) -> Result<()> {
        if self.framing {
            self.buffer.extend_from_slice(data);
        } else {
            self.inner.write_all(data)?;
        }
        Ok(())
    }

    /// Emit the pending frame (possibly empty) and flush the inner writer.
    ///
    /// The pending frame is dropped even if writing it fails, so a retried
    /// flush never repeats a partially written frame. After such an error
    /// the peer's view of the stream is undefined.
    pub fn flush_frame(&mut self) -> Result<()> {
        if self.framing {
            let length = payload_length(&self.buffer[LENGTH_PREFIX_SIZE..])?;
            self.buffer[..LENGTH_PREFIX_SIZE].copy_from_slice(&encode_length(length));
            let written = self.inner.write_all(&self.buffer);
            self.buffer.truncate(LENGTH_PREFIX_SIZE);
            if let Err(e) = written {
                tracing::error!("Failed to write {} byte frame: {}", length, e);
                return Err(e.into());
            }
        }
        self.inner.flush()?;
        Ok(())
    }

    /// Bytes written since the last flush.
    pub fn pending(&self) -> usize {
        self.buffer.len() - LENGTH_PREFIX_SIZE
    }

    /// Get a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the inner writer, discarding any unflushed frame.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for FramedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.framing {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        } else {
            self.inner.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_frame().map_err(|e| match e {
            crate::error::FramedError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_frame, FrameBuffer};

    #[test]
    fn test_flush_emits_one_frame() {
        let mut writer = FramedWriter::new(Vec::new());

        writer.write_frame_bytes(b"ab").unwrap();
        writer.write_frame_bytes(b"cd").unwrap();
        assert_eq!(writer.pending(), 4);
        assert!(writer.get_ref().is_empty());

        writer.flush_frame().unwrap();

        assert_eq!(writer.pending(), 0);
        assert_eq!(writer.into_inner(), build_frame(b"abcd").unwrap());
    }

    #[test]
    fn test_consecutive_frames() {
        let mut writer = FramedWriter::new(Vec::new());

        writer.write_all(b"first").unwrap();
        writer.flush().unwrap();
        writer.write_all(b"second").unwrap();
        writer.flush().unwrap();

        let mut buffer = FrameBuffer::new();
        let frames = buffer.push(&writer.into_inner()).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..], b"first");
        assert_eq!(&frames[1][..], b"second");
    }

    #[test]
    fn test_empty_flush_writes_empty_frame() {
        let mut writer = FramedWriter::new(Vec::new());
        writer.flush_frame().unwrap();
        assert_eq!(writer.into_inner(), vec![0, 0, 0, 0]);
    }

    /// Accepts `budget` bytes, then fails every write.
    struct Failing {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for Failing {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.written.extend_from_slice(&buf[..n]);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_flush_drops_frame() {
        let mut writer = FramedWriter::new(Failing {
            written: Vec::new(),
            budget: 6,
        });
        writer.write_all(b"payload").unwrap();

        assert!(writer.flush_frame().is_err());
        assert_eq!(writer.pending(), 0);
        assert_eq!(writer.get_ref().written, b"\0\0\0\x07pa");

        // A retry has nothing left to resend.
        writer.flush_frame().unwrap_err();
        assert_eq!(writer.get_ref().written.len(), 6);
    }

    #[test]
    fn test_unframed_writes_through() {
        let mut writer = FramedWriter::with_framing(Vec::new(), false);

        writer.write_frame_bytes(b"raw").unwrap();
        writer.write_all(b" data").unwrap();
        assert_eq!(writer.pending(), 0);

        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), b"raw data".to_vec());
    }
}
