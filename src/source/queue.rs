//! In-memory queue of already-acquired frames.

use std::collections::VecDeque;

use bytes::Bytes;

use super::FrameSource;
use crate::error::{FramedError, Result};

/// FIFO of frame payloads.
///
/// Useful with [`FrameBuffer`](crate::protocol::FrameBuffer), which extracts
/// frames from pushed chunks, and in tests.
///
/// # Example
///
/// ```
/// use framed_reader::source::{FrameQueue, FrameSource};
///
/// let mut queue: FrameQueue = ["AB", "CDE"].into_iter().collect();
/// assert_eq!(&queue.next_frame().unwrap()[..], b"AB");
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    frames: VecDeque<Bytes>,
}

impl FrameQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one frame.
    pub fn push(&mut self, frame: impl Into<Bytes>) {
        self.frames.push_back(frame.into());
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frames are queued.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for FrameQueue {
    fn next_frame(&mut self) -> Result<Bytes> {
        self.frames.pop_front().ok_or(FramedError::ConnectionClosed)
    }
}

impl<B: Into<Bytes>> Extend<B> for FrameQueue {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        self.frames.extend(iter.into_iter().map(Into::into));
    }
}

impl<B: Into<Bytes>> FromIterator<B> for FrameQueue {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
