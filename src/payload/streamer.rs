//! Synthetic payload generation.
//!
//! # Responsibilities
//! - Compute how many whole chunks a download writes
//! - Build one chunk buffer per request and write it repeatedly
//! - Stop at the first failed write
//!
//! # Design Decisions
//! - Remainder bytes (`size % chunk_size`) are never written
//! - The chunk is an `axum::body::Bytes`, so repeats share one allocation
//! - Sinks are a trait; the HTTP body channel is the production sink

use std::future::Future;
use std::io;

use axum::body::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::PayloadFill;
use crate::payload::params::{DownloadParams, DEFAULT_CHUNK_SIZE};

/// Number and size of the chunks a download writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    chunk_size: usize,
    chunks: u64,
}

impl ChunkPlan {
    pub fn new(params: DownloadParams) -> Self {
        let chunk_size = usize::try_from(params.chunk_size)
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CHUNK_SIZE as usize);

        Self {
            chunk_size,
            chunks: params.size / chunk_size as u64,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Bytes on the wire: `floor(size / chunk_size) * chunk_size`.
    pub fn total_bytes(&self) -> u64 {
        self.chunks * self.chunk_size as u64
    }
}

/// Destination for payload chunks.
pub trait ChunkSink: Send {
    /// Write one chunk. An error ends the stream.
    fn write_chunk(&mut self, chunk: Bytes) -> impl Future<Output = io::Result<()>> + Send;
}

/// Feeds chunks into a bounded channel drained by the response body.
///
/// The body drops its receiver when the client goes away, which turns the
/// next send into a `BrokenPipe`.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }
}

impl ChunkSink for ChannelSink {
    async fn write_chunk(&mut self, chunk: Bytes) -> io::Result<()> {
        self.tx
            .send(chunk)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body dropped"))
    }
}

/// Writes chunks straight to an `AsyncWrite`.
#[cfg(test)]
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

#[cfg(test)]
impl<W> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
impl<W> ChunkSink for WriterSink<W>
where
    W: tokio::io::AsyncWrite + Unpin + Send,
{
    async fn write_chunk(&mut self, chunk: Bytes) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.inner.write_all(&chunk).await
    }
}

/// A download that stopped before writing every chunk.
#[derive(Debug, Error)]
#[error("payload stream aborted after {written} bytes: {source}")]
pub struct StreamAborted {
    pub written: u64,
    #[source]
    pub source: io::Error,
}

/// Writes synthetic payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadStreamer {
    fill: PayloadFill,
}

impl PayloadStreamer {
    pub fn new(fill: PayloadFill) -> Self {
        Self { fill }
    }

    /// Build the chunk buffer repeated for a whole download.
    pub fn chunk(&self, size: usize) -> Bytes {
        let mut buf = vec![0u8; size];
        if self.fill == PayloadFill::Random {
            fastrand::fill(&mut buf);
        }
        Bytes::from(buf)
    }

    /// Write every chunk of `plan` to `sink`, returning the bytes written.
    pub async fn stream<S: ChunkSink>(
        &self,
        plan: ChunkPlan,
        sink: &mut S,
    ) -> Result<u64, StreamAborted> {
        if plan.chunks() == 0 {
            return Ok(0);
        }

        let chunk = self.chunk(plan.chunk_size());
        let mut written = 0u64;

        for _ in 0..plan.chunks() {
            if let Err(source) = sink.write_chunk(chunk.clone()).await {
                return Err(StreamAborted { written, source });
            }
            written += chunk.len() as u64;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(size: u64, chunk_size: u64) -> ChunkPlan {
        ChunkPlan::new(DownloadParams { size, chunk_size })
    }

    #[test]
    fn test_plan_truncates_remainder() {
        let p = plan(1000, 300);
        assert_eq!(p.chunks(), 3);
        assert_eq!(p.total_bytes(), 900);

        assert_eq!(plan(100, 300).total_bytes(), 0);
        assert_eq!(plan(0, 300).total_bytes(), 0);
        assert_eq!(plan(8 * 1024 * 1024, 64 * 1024).total_bytes(), 8 * 1024 * 1024);
    }

    #[test]
    fn test_plan_never_divides_by_zero() {
        let p = plan(DEFAULT_CHUNK_SIZE * 2, 0);
        assert_eq!(p.chunk_size(), DEFAULT_CHUNK_SIZE as usize);
        assert_eq!(p.chunks(), 2);
    }

    #[test]
    fn test_random_fill_has_requested_length() {
        let chunk = PayloadStreamer::new(PayloadFill::Random).chunk(4096);
        assert_eq!(chunk.len(), 4096);

        let zeros = PayloadStreamer::new(PayloadFill::Zeros).chunk(16);
        assert!(zeros.iter().all(|b| *b == 0));
    }

    #[tokio::test]
    async fn test_stream_to_writer() {
        let mut sink = WriterSink::new(Vec::new());
        let written = PayloadStreamer::default()
            .stream(plan(10_000, 1024), &mut sink)
            .await
            .unwrap();

        assert_eq!(written, 9 * 1024);
        assert_eq!(sink.into_inner().len(), 9 * 1024);
    }

    #[tokio::test]
    async fn test_stream_to_channel() {
        let (tx, mut rx) = mpsc::channel(2);
        let task = tokio::spawn(async move {
            let mut sink = ChannelSink::new(tx);
            PayloadStreamer::default().stream(plan(5 * 512, 512), &mut sink).await
        });

        let mut chunks = 0;
        while let Some(chunk) = rx.recv().await {
            assert_eq!(chunk.len(), 512);
            chunks += 1;
        }

        assert_eq!(chunks, 5);
        assert_eq!(task.await.unwrap().unwrap(), 5 * 512);
    }

    #[tokio::test]
    async fn test_stream_aborts_when_receiver_dropped() {
        let (tx, mut rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut sink = ChannelSink::new(tx);
            PayloadStreamer::default().stream(plan(100 * 64, 64), &mut sink).await
        });

        rx.recv().await.unwrap();
        drop(rx);

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::BrokenPipe);
        assert!(err.written < 100 * 64);
    }
}
