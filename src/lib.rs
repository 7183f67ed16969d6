//! # framed-reader
//!
//! Read-side buffering for length-framed message transports.
//!
//! A protocol decoder wants byte-level reads; the wire delivers whole
//! length-prefixed frames. [`BufferedFrameReader`] bridges the two: it
//! holds the current frame and a cursor into it, and acquires the next
//! frame from a [`FrameSource`](source::FrameSource) only when the cursor
//! runs off the end.
//!
//! ## Architecture
//!
//! - **Reader** ([`BufferedFrameReader`]): `read`, `read_byte`,
//!   `read_into_buffer` over frames, or straight through to the raw
//!   transport when framing is disabled
//! - **Sources** ([`source`]): frame acquisition from a transport, a queue
//!   or an async reader task
//! - **Transports** ([`transport`]): raw byte primitives
//! - **Protocol** ([`protocol`]): 4-byte big-endian length prefix
//! - **Writer** ([`writer`]): write-side framing
//!
//! ## Example
//!
//! ```
//! use framed_reader::protocol::build_frame;
//! use framed_reader::transport::MemoryTransport;
//! use framed_reader::{BufferedFrameReader, ReaderConfig};
//!
//! let mut wire = build_frame(b"AB").unwrap();
//! wire.extend(build_frame(b"CDE").unwrap());
//!
//! let mut reader = BufferedFrameReader::new(MemoryTransport::from(wire), &ReaderConfig::default());
//! let mut dst = [0u8; 4];
//! reader.read_into_buffer(&mut dst, 4).unwrap();
//! assert_eq!(&dst, b"ABCD");
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod source;
pub mod transport;
pub mod writer;

mod reader;

pub use config::ReaderConfig;
pub use error::FramedError;
pub use reader::{BufferedFrameReader, ReaderParts};
pub use writer::FramedWriter;
