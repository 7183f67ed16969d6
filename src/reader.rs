//! Buffered reads over length-prefixed frames.
//!
//! [`BufferedFrameReader`] presents byte-level reads to a protocol decoder
//! while consuming whole frames from a [`FrameSource`]. It keeps the
//! current frame and a cursor into it; when the cursor reaches the end of
//! the frame the next read refills from the source and resets the cursor.
//!
//! In pass-through mode framing is disabled and every read goes straight
//! to the raw [`Transport`].
//!
//! # Example
//!
//! ```
//! use framed_reader::source::FrameQueue;
//! use framed_reader::transport::MemoryTransport;
//! use framed_reader::BufferedFrameReader;
//!
//! let frames: FrameQueue = ["HELLO", "WORLD"].into_iter().collect();
//! let mut reader: BufferedFrameReader<MemoryTransport, _> = BufferedFrameReader::framed(frames);
//!
//! assert_eq!(&reader.read(3).unwrap()[..], b"HEL");
//! assert_eq!(reader.read_byte().unwrap(), b'L');
//! assert_eq!(&reader.read(1).unwrap()[..], b"O");
//! assert_eq!(&reader.read(1).unwrap()[..], b"W");
//! ```

use bytes::Bytes;

use crate::config::ReaderConfig;
use crate::error::{FramedError, Result};
use crate::source::{FrameSource, LengthPrefixedSource};
use crate::transport::Transport;

/// Current frame, read cursor and the source that refills them.
///
/// Invariant: `cursor <= frame.len()`.
#[derive(Debug)]
struct FrameCursor<S> {
    frame: Bytes,
    cursor: usize,
    source: S,
}

impl<S: FrameSource> FrameCursor<S> {
    fn new(source: S) -> Self {
        Self {
            frame: Bytes::new(),
            cursor: 0,
            source,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.frame.len() - self.cursor
    }

    /// Replace the current frame with the next one from the source.
    ///
    /// On error the current frame and cursor are left as they were.
    fn refill(&mut self) -> Result<()> {
        let frame = self.source.next_frame()?;
        tracing::trace!("Refilled frame buffer with {} bytes", frame.len());
        self.frame = frame;
        self.cursor = 0;
        Ok(())
    }

    /// Refill once if the current frame is exhausted.
    fn fill(&mut self) -> Result<()> {
        if self.remaining() == 0 {
            self.refill()?;
            if self.frame.is_empty() {
                return Err(FramedError::EmptyFrame);
            }
        }
        Ok(())
    }

    fn read(&mut self, length: usize) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        self.fill()?;

        let available = self.remaining();
        if length > available {
            return Err(FramedError::FrameOverrun {
                requested: length,
                available,
            });
        }

        let chunk = self.frame.slice(self.cursor..self.cursor + length);
        self.cursor += length;
        Ok(chunk)
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.fill()?;
        let byte = self.frame[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    fn read_into_buffer(&mut self, dst: &mut [u8], size: usize) -> Result<usize> {
        if size > dst.len() {
            return Err(FramedError::OutOfBounds {
                index: dst.len(),
                capacity: dst.len(),
            });
        }

        let mut written = 0;
        while written < size {
            self.fill()?;

            let n = self.remaining().min(size - written);
            dst[written..written + n].copy_from_slice(&self.frame[self.cursor..self.cursor + n]);
            self.cursor += n;
            written += n;
        }
        Ok(written)
    }
}

#[derive(Debug)]
enum ReadMode<T, S> {
    Framed(FrameCursor<S>),
    PassThrough(T),
}

/// What a reader was built around, returned by
/// [`BufferedFrameReader::into_parts`].
#[derive(Debug)]
pub enum ReaderParts<T, S> {
    /// Framed mode: the frame source and the unread rest of the current frame.
    Framed { source: S, unread: Bytes },
    /// Pass-through mode: the raw transport.
    PassThrough { transport: T },
}

/// Byte-oriented reader over a stream of frames.
///
/// The mode (framed or pass-through) is fixed at construction. Every
/// read takes `&mut self`; a reader is meant to live on one connection's
/// read path. Slices returned by [`read`](Self::read) are reference
/// counted and stay valid after later refills.
#[derive(Debug)]
pub struct BufferedFrameReader<T, S> {
    mode: ReadMode<T, S>,
}

impl<T: Transport> BufferedFrameReader<T, LengthPrefixedSource<T>> {
    /// Build a reader over `transport` according to `config`.
    ///
    /// With framing enabled, frames are read as 4-byte length prefix plus
    /// payload, limited to `config.max_frame_size`. Otherwise the reader
    /// passes every call through to `transport`.
    pub fn new(transport: T, config: &ReaderConfig) -> Self {
        if config.framing {
            Self::framed(LengthPrefixedSource::with_max_frame_size(
                transport,
                config.max_frame_size,
            ))
        } else {
            Self::pass_through(transport)
        }
    }
}

impl<T: Transport, S: FrameSource> BufferedFrameReader<T, S> {
    /// Create a framed reader refilled from `source`.
    ///
    /// No frame is acquired until the first read.
    pub fn framed(source: S) -> Self {
        Self {
            mode: ReadMode::Framed(FrameCursor::new(source)),
        }
    }

    /// Create a reader that delegates every call to `transport`.
    pub fn pass_through(transport: T) -> Self {
        Self {
            mode: ReadMode::PassThrough(transport),
        }
    }

    /// Read `length` bytes from the current frame.
    ///
    /// Refills at most once, and only when the current frame is exhausted.
    /// `read(0)` returns an empty buffer without refilling.
    ///
    /// # Errors
    ///
    /// - `FrameOverrun` if `length` exceeds what the current frame holds;
    ///   the cursor is not moved. Use
    ///   [`read_into_buffer`](Self::read_into_buffer) to span frames.
    /// - `EmptyFrame` if the refill produced an empty frame.
    /// - Any error from the frame source, unchanged.
    pub fn read(&mut self, length: usize) -> Result<Bytes> {
        match &mut self.mode {
            ReadMode::Framed(state) => state.read(length),
            ReadMode::PassThrough(transport) => transport.read(length),
        }
    }

    /// Read one byte, refilling first if the current frame is exhausted.
    pub fn read_byte(&mut self) -> Result<u8> {
        match &mut self.mode {
            ReadMode::Framed(state) => state.read_byte(),
            ReadMode::PassThrough(transport) => transport.read_byte(),
        }
    }

    /// Copy `size` bytes into `dst[..size]`, crossing as many frame
    /// boundaries as needed.
    ///
    /// Returns `size` on success. If a refill fails partway, the bytes
    /// already copied stay consumed.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` naming the first index past `dst` when `size` does
    ///   not fit; nothing is copied or consumed.
    /// - `EmptyFrame` or any frame source error.
    pub fn read_into_buffer(&mut self, dst: &mut [u8], size: usize) -> Result<usize> {
        match &mut self.mode {
            ReadMode::Framed(state) => state.read_into_buffer(dst, size),
            ReadMode::PassThrough(transport) => transport.read_into_buffer(dst, size),
        }
    }

    /// Check if the reader consumes frames (false in pass-through mode).
    pub fn is_framed(&self) -> bool {
        matches!(self.mode, ReadMode::Framed(_))
    }

    /// Bytes left in the current frame (0 in pass-through mode).
    pub fn remaining(&self) -> usize {
        match &self.mode {
            ReadMode::Framed(state) => state.remaining(),
            ReadMode::PassThrough(_) => 0,
        }
    }

    /// Get a reference to the frame source, if framed.
    pub fn source(&self) -> Option<&S> {
        match &self.mode {
            ReadMode::Framed(state) => Some(&state.source),
            ReadMode::PassThrough(_) => None,
        }
    }

    /// Get a reference to the raw transport, if passing through.
    pub fn transport(&self) -> Option<&T> {
        match &self.mode {
            ReadMode::Framed(_) => None,
            ReadMode::PassThrough(transport) => Some(transport),
        }
    }

    /// Take the reader apart.
    pub fn into_parts(self) -> ReaderParts<T, S> {
        match self.mode {
            ReadMode::Framed(state) => ReaderParts::Framed {
                unread: state.frame.slice(state.cursor..),
                source: state.source,
            },
            ReadMode::PassThrough(transport) => ReaderParts::PassThrough { transport },
        }
    }
}
