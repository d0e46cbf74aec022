//! Recording seams
//!
//! Trait definitions for everything the hybrid recorder talks to: the opaque
//! capture stream it consumes, the optional local durable sink, and the
//! remote chunk store. Concrete transports live behind these so the
//! coordinator can be exercised without real devices or a network.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors from the recording pipeline
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("no capture stream available")]
    NoStream,

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("local sink error: {0}")]
    Sink(#[from] std::io::Error),

    #[error("chunk upload failed: {0}")]
    Upload(String),
}

/// Result type for recording operations
pub type RecordingResult<T> = Result<T, RecordingError>;

/// A bounded slice of captured media
#[derive(Debug, Clone)]
pub struct MediaChunk {
    pub data: Vec<u8>,
}

impl MediaChunk {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// Opaque handle to a live audio/video stream
///
/// The source is expected to emit chunks in fixed time slices (nominally one
/// second). `None` means the stream ended.
#[async_trait]
pub trait CaptureStream: Send {
    async fn next_chunk(&mut self) -> Option<MediaChunk>;
}

/// Optional user-selected durable sink
#[async_trait]
pub trait LocalSink: Send {
    async fn append(&mut self, data: &[u8]) -> std::io::Result<()>;

    /// Flush and finalize. Called exactly once, at stop.
    async fn close(&mut self) -> std::io::Result<()>;
}

/// Acquires a local sink at recording start
///
/// Acquisition is best-effort: an error here degrades the session to
/// cloud-only mode, it never blocks the start.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    async fn acquire(&self) -> std::io::Result<Box<dyn LocalSink>>;
}

/// Remote chunk store, assumed idempotent per sequence number
///
/// Uploads are fire-and-forget from the capture loop's point of view;
/// completion order is not guaranteed and reassembly relies on the sequence
/// numbers.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn upload_chunk(&self, data: Vec<u8>, sequence: u64) -> RecordingResult<()>;
}

/// File-backed local sink
pub struct FileSink {
    file: tokio::fs::File,
}

impl FileSink {
    pub async fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self { file })
    }
}

#[async_trait]
impl LocalSink for FileSink {
    async fn append(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data).await
    }

    async fn close(&mut self) -> std::io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }
}
