//! Error types for framed-reader.

use thiserror::Error;

/// Main error type for all framed read operations.
#[derive(Debug, Error)]
pub enum FramedError {
    /// I/O error from the raw transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while loading configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `read_into_buffer` was asked to write past the destination.
    #[error("index {index} out of buffer (capacity {capacity})")]
    OutOfBounds { index: usize, capacity: usize },

    /// `read` asked for more bytes than the current frame holds.
    #[error("read of {requested} bytes overruns frame ({available} available)")]
    FrameOverrun { requested: usize, available: usize },

    /// Refill produced a frame with no bytes where at least one was needed.
    #[error("Empty frame after refill")]
    EmptyFrame,

    /// Length prefix larger than the configured maximum.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge { size: u32, max: u32 },

    /// Transport or frame source ended mid-stream.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Any other malformed input.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type alias using FramedError.
pub type Result<T> = std::result::Result<T, FramedError>;
