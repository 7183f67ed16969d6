//! Feeder - example of an async task driving a blocking reader.
//!
//! This example demonstrates:
//! - Spawning a frame reader task over an async byte stream
//! - Consuming its frames with `read`, `read_byte` and `read_into_buffer`
//!   from a blocking thread
//! - Writing frames with `FramedWriter`
//!
//! # Running
//!
//! ```text
//! cargo run --example feeder
//! ```

use std::io::Write;

use framed_reader::source::spawn_frame_reader;
use framed_reader::transport::MemoryTransport;
use framed_reader::{BufferedFrameReader, FramedError, FramedWriter, ReaderConfig};
use tokio::io::AsyncWriteExt;

/// Frames the peer sends: a 2-byte tag, a length byte, then a body.
const MESSAGES: &[&[u8]] = &[b"HI\x05hello", b"HI\x05", b"world", b"BY\x00"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (mut peer, stream) = tokio::io::duplex(64);
    let config = ReaderConfig::new().read_chunk_size(8);
    let (source, feeder) = spawn_frame_reader(stream, &config);

    // The decoder side is synchronous and blocks on each refill.
    let decoder = tokio::task::spawn_blocking(move || {
        let mut reader: BufferedFrameReader<MemoryTransport, _> =
            BufferedFrameReader::framed(source);
        let mut decoded = Vec::new();
        loop {
            let tag = match reader.read(2) {
                Ok(tag) => tag,
                Err(FramedError::ConnectionClosed) => break,
                Err(e) => return Err(e),
            };
            let len = reader.read_byte()? as usize;
            let mut body = vec![0u8; len];
            reader.read_into_buffer(&mut body, len)?;
            decoded.push((String::from_utf8_lossy(&tag).into_owned(), body));
        }
        Ok::<_, FramedError>(decoded)
    });

    let mut writer = FramedWriter::new(Vec::new());
    for message in MESSAGES {
        writer.write_all(message)?;
        writer.flush()?;
    }
    peer.write_all(&writer.into_inner()).await?;
    drop(peer);

    for (tag, body) in decoder.await?? {
        println!("{}: {:?}", tag, String::from_utf8_lossy(&body));
    }
    feeder.await??;

    Ok(())
}
