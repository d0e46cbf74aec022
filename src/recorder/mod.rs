//! Hybrid recording system
//!
//! - Seam traits for the capture stream, local sink, and remote store
//! - `HybridRecorder` coordinating the dual-path pipeline
//! - Status types the operator surface reads

pub mod channel;
pub mod coordinator;
pub mod state;

pub use channel::{
    CaptureStream, FileSink, LocalSink, MediaChunk, RecordingError, RecordingResult, RemoteStore,
    SinkFactory,
};
pub use coordinator::{HybridRecorder, RecordingEvent};
pub use state::{RecorderStatus, RecordingState};
