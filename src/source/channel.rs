//! Frames produced by an async reader task.
//!
//! [`spawn_frame_reader`] reads chunks from an async byte stream, splits
//! them into frames with a [`FrameBuffer`] and forwards each frame over a
//! channel. The receiving [`ChannelSource`] is a blocking [`FrameSource`],
//! so a synchronous reader can consume frames on its own thread.
//!
//! ```text
//! AsyncRead ─► reader task (FrameBuffer) ─► mpsc<Bytes> ─► ChannelSource ─► BufferedFrameReader
//! ```

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::FrameSource;
use crate::config::ReaderConfig;
use crate::error::{FramedError, Result};
use crate::protocol::FrameBuffer;

/// Default number of frames buffered between the task and the source.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Frame source fed by a tokio channel.
///
/// `next_frame` blocks the calling thread, so it must not be called from
/// inside an async context (use `spawn_blocking` or a plain thread).
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<Bytes>,
}

impl ChannelSource {
    /// Create a source from a receiver.
    pub fn new(rx: mpsc::Receiver<Bytes>) -> Self {
        Self { rx }
    }

    /// Create a connected sender/source pair.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Bytes>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

impl FrameSource for ChannelSource {
    fn next_frame(&mut self) -> Result<Bytes> {
        self.rx.blocking_recv().ok_or(FramedError::ConnectionClosed)
    }
}

/// Spawn a task that reads frames from `reader` into a [`ChannelSource`].
///
/// The task ends with `Ok(())` on a clean EOF at a frame boundary or when
/// the source is dropped. EOF inside a frame, I/O errors and oversize
/// length prefixes end it with an error, which is also logged.
///
/// Must be called from within a tokio runtime.
pub fn spawn_frame_reader<R>(
    reader: R,
    config: &ReaderConfig,
) -> (ChannelSource, JoinHandle<Result<()>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, source) = ChannelSource::channel(DEFAULT_CHANNEL_CAPACITY);
    let frame_buffer = FrameBuffer::with_max_frame_size(config.max_frame_size);
    let chunk_size = config.read_chunk_size.max(1);

    let task = tokio::spawn(async move {
        let result = read_loop(reader, frame_buffer, chunk_size, tx).await;
        if let Err(e) = &result {
            tracing::error!("Frame reader error: {}", e);
        }
        result
    });

    (source, task)
}

async fn read_loop<R: AsyncRead + Unpin>(
    mut reader: R,
    mut frame_buffer: FrameBuffer,
    chunk_size: usize,
    tx: mpsc::Sender<Bytes>,
) -> Result<()> {
    let mut buf = vec![0u8; chunk_size];

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) if frame_buffer.is_mid_frame() => return Err(FramedError::ConnectionClosed),
            Ok(0) => {
                tracing::debug!("Frame stream closed");
                return Ok(());
            }
            Ok(n) => n,
            Err(e) => return Err(FramedError::Io(e)),
        };

        for frame in frame_buffer.push(&buf[..n])? {
            if tx.send(frame).await.is_err() {
                tracing::debug!("Frame source dropped, stopping reader");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_frame, encode_length};
    use tokio::io::AsyncWriteExt;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_frames_reach_blocking_source() {
        let (mut client, server) = tokio::io::duplex(64);
        let (mut source, task) = spawn_frame_reader(server, &ReaderConfig::default());

        let mut wire = build_frame(b"first").unwrap();
        wire.extend(build_frame(b"second").unwrap());
        client.write_all(&wire).await.unwrap();
        drop(client);

        let frames = tokio::task::spawn_blocking(move || {
            let first = source.next_frame().unwrap();
            let second = source.next_frame().unwrap();
            let end = source.next_frame();
            (first, second, end)
        })
        .await
        .unwrap();

        assert_eq!(&frames.0[..], b"first");
        assert_eq!(&frames.1[..], b"second");
        assert!(matches!(frames.2, Err(FramedError::ConnectionClosed)));
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_eof_mid_frame_is_error() {
        let (mut client, server) = tokio::io::duplex(64);
        let (_source, task) = spawn_frame_reader(server, &ReaderConfig::default());

        client.write_all(&encode_length(8)).await.unwrap();
        client.write_all(b"half").await.unwrap();
        drop(client);

        assert!(matches!(
            task.await.unwrap(),
            Err(FramedError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_oversize_frame_is_error() {
        let (mut client, server) = tokio::io::duplex(64);
        let config = ReaderConfig::new().max_frame_size(4);
        let (_source, task) = spawn_frame_reader(server, &config);

        client.write_all(&build_frame(b"too large").unwrap()).await.unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(FramedError::FrameTooLarge { size: 9, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_dropped_source_stops_task() {
        let (mut client, server) = tokio::io::duplex(64);
        let (source, task) = spawn_frame_reader(server, &ReaderConfig::default());
        drop(source);

        client.write_all(&build_frame(b"ignored").unwrap()).await.unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[test]
    fn test_channel_pair() {
        let (tx, mut source) = ChannelSource::channel(4);
        tx.try_send(Bytes::from_static(b"direct")).unwrap();
        drop(tx);

        assert_eq!(&source.next_frame().unwrap()[..], b"direct");
        assert!(matches!(
            source.next_frame(),
            Err(FramedError::ConnectionClosed)
        ));
    }
}
