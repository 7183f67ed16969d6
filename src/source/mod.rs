//! Frame sources - the refill side of a framed reader.
//!
//! A [`FrameSource`] hands out one complete frame payload per call. The
//! reader asks for a new frame only when the current one is exhausted.
//!
//! - [`LengthPrefixedSource`] - pulls prefix + payload from a [`Transport`](crate::transport::Transport)
//! - [`FrameQueue`] - frames already acquired elsewhere (e.g. a [`FrameBuffer`](crate::protocol::FrameBuffer))
//! - [`ChannelSource`] - frames produced by an async task, see [`spawn_frame_reader`]
//! - [`from_fn`] - frames produced by a closure

mod channel;
mod length_prefixed;
mod queue;

pub use channel::{spawn_frame_reader, ChannelSource, DEFAULT_CHANNEL_CAPACITY};
pub use length_prefixed::LengthPrefixedSource;
pub use queue::FrameQueue;

use bytes::Bytes;

use crate::error::Result;

/// Produces the next complete frame payload.
///
/// Errors are returned to the caller of the read that triggered the
/// refill. A source must not be called concurrently with itself.
pub trait FrameSource {
    /// Acquire the next frame.
    fn next_frame(&mut self) -> Result<Bytes>;
}

/// Source backed by a closure, see [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Create a source that calls `f` for every frame.
///
/// ```
/// use bytes::Bytes;
/// use framed_reader::source::{from_fn, FrameSource};
///
/// let mut source = from_fn(|| Ok(Bytes::from_static(b"ping")));
/// assert_eq!(&source.next_frame().unwrap()[..], b"ping");
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Result<Bytes>,
{
    FromFn(f)
}

impl<F> FrameSource for FromFn<F>
where
    F: FnMut() -> Result<Bytes>,
{
    fn next_frame(&mut self) -> Result<Bytes> {
        (self.0)()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> Result<Bytes> {
        (**self).next_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Bytes> {
        (**self).next_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramedError;

    #[test]
    fn test_closure_source() {
        let mut count = 0u8;
        let mut source = from_fn(move || {
            count += 1;
            Ok(Bytes::from(vec![count]))
        });

        assert_eq!(&source.next_frame().unwrap()[..], &[1]);
        assert_eq!(&source.next_frame().unwrap()[..], &[2]);
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn FrameSource> =
            Box::new(from_fn(|| Err(FramedError::ConnectionClosed)));
        assert!(matches!(
            source.next_frame(),
            Err(FramedError::ConnectionClosed)
        ));
    }

    #[test]
    fn test_boxed_and_borrowed_sources_drive_reader() {
        use crate::transport::MemoryTransport;
        use crate::BufferedFrameReader;

        let boxed: Box<dyn FrameSource> = Box::new(from_fn(|| Ok(Bytes::from_static(b"xy"))));
        let mut reader: BufferedFrameReader<MemoryTransport, _> =
            BufferedFrameReader::framed(boxed);
        assert_eq!(reader.read_byte().unwrap(), b'x');

        let mut queue: FrameQueue = ["ab"].into_iter().collect();
        let mut borrowed: BufferedFrameReader<MemoryTransport, _> =
            BufferedFrameReader::framed(&mut queue);
        let mut dst = [0u8; 2];
        borrowed.read_into_buffer(&mut dst, 2).unwrap();
        assert_eq!(&dst, b"ab");
        drop(borrowed);
        assert!(queue.is_empty());
    }
}
