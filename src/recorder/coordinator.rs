//! Hybrid recorder
//!
//! Records the live feed through two independent paths at once: an optional
//! local durable sink and a remote chunked upload. Each captured chunk is
//! appended to the sink when one is open and unconditionally handed to the
//! remote store tagged with a monotonically increasing sequence number. The
//! two paths have separate failure boundaries; a fault in one never touches
//! the other, and mid-session IO failures never stop the capture loop.

use super::channel::{
    CaptureStream, LocalSink, RecordingError, RecordingResult, RemoteStore, SinkFactory,
};
use super::state::{RecorderStatus, RecordingState};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Events emitted during recording
#[derive(Debug, Clone)]
pub enum RecordingEvent {
    /// Recording started
    Started,
    /// Recording stopped
    Stopped,
    /// A chunk was captured and dispatched (sequence number)
    ChunkCaptured(u64),
    /// Non-fatal error occurred
    Error(String),
}

/// Dual-path recording coordinator
pub struct HybridRecorder {
    /// Current status snapshot
    status: Arc<RwLock<RecorderStatus>>,

    /// Remote chunk store
    remote: Arc<dyn RemoteStore>,

    /// Optional local sink acquisition
    sink_factory: Option<Arc<dyn SinkFactory>>,

    /// Shutdown signal for the capture task
    shutdown_tx: Option<watch::Sender<bool>>,

    /// Capture loop task
    capture_task: Option<JoinHandle<()>>,

    /// Wall-clock elapsed timer task
    timer_task: Option<JoinHandle<()>>,

    /// Event broadcaster
    event_tx: broadcast::Sender<RecordingEvent>,
}

impl HybridRecorder {
    pub fn new(remote: Arc<dyn RemoteStore>, sink_factory: Option<Arc<dyn SinkFactory>>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            status: Arc::new(RwLock::new(RecorderStatus::default())),
            remote,
            sink_factory,
            shutdown_tx: None,
            capture_task: None,
            timer_task: None,
            event_tx,
        }
    }

    /// Get a copy of the current status
    pub fn status(&self) -> RecorderStatus {
        self.status.read().clone()
    }

    pub fn is_recording(&self) -> bool {
        self.status.read().is_recording()
    }

    /// Subscribe to recording events
    pub fn subscribe(&self) -> broadcast::Receiver<RecordingEvent> {
        self.event_tx.subscribe()
    }

    /// Start recording from a capture stream.
    ///
    /// Fails when no stream is supplied or a recording is already running.
    /// Local sink acquisition is best-effort: failure logs a warning, flags
    /// the status as degraded, and the session proceeds cloud-only.
    pub async fn start(&mut self, stream: Option<Box<dyn CaptureStream>>) -> RecordingResult<()> {
        if self.is_recording() {
            return Err(RecordingError::AlreadyRecording);
        }

        let Some(mut stream) = stream else {
            self.status.write().last_error = Some("No media stream available".to_string());
            return Err(RecordingError::NoStream);
        };

        let mut sink = self.acquire_sink().await;

        tracing::info!(local_sink = sink.is_some(), "Starting hybrid recording");
        {
            let mut status = self.status.write();
            status.state = RecordingState::Recording;
            status.elapsed_seconds = 0;
            status.chunk_count = 0;
            status.local_sink_active = sink.is_some();
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        self.shutdown_tx = Some(shutdown_tx);

        // Elapsed time runs on its own wall-clock timer, independent of
        // chunk cadence.
        let status = self.status.clone();
        self.timer_task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let mut status = status.write();
                if !status.is_recording() {
                    break;
                }
                status.elapsed_seconds += 1;
            }
        }));

        let status = self.status.clone();
        let remote = self.remote.clone();
        let event_tx = self.event_tx.clone();
        self.capture_task = Some(tokio::spawn(async move {
            let mut sequence: u64 = 0;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    chunk = stream.next_chunk() => {
                        let Some(chunk) = chunk else {
                            tracing::info!("Capture stream ended");
                            status.write().state = RecordingState::Idle;
                            break;
                        };

                        // Path A: local durable sink. Write failures are
                        // logged and the loop continues.
                        if let Some(sink) = sink.as_mut() {
                            if let Err(err) = sink.append(&chunk.data).await {
                                tracing::error!(%err, sequence, "Local sink write failed, continuing");
                                let _ = event_tx.send(RecordingEvent::Error(err.to_string()));
                            }
                        }

                        // Path B: remote upload, fire-and-forget. The loop
                        // never waits on the network.
                        let remote = remote.clone();
                        let data = chunk.data;
                        let seq = sequence;
                        tokio::spawn(async move {
                            if let Err(err) = remote.upload_chunk(data, seq).await {
                                tracing::warn!(%err, sequence = seq, "Chunk upload failed");
                            }
                        });

                        status.write().chunk_count = sequence + 1;
                        let _ = event_tx.send(RecordingEvent::ChunkCaptured(sequence));
                        sequence += 1;
                    }
                }
            }

            if let Some(mut sink) = sink {
                if let Err(err) = sink.close().await {
                    tracing::error!(%err, "Failed to close local sink");
                }
            }
        }));

        let _ = self.event_tx.send(RecordingEvent::Started);
        Ok(())
    }

    /// Stop recording. A no-op while idle. Elapsed time persists until the
    /// next start.
    pub async fn stop(&mut self) {
        if !self.is_recording() && self.capture_task.is_none() {
            tracing::debug!("Stop requested while idle, ignoring");
            return;
        }

        tracing::info!("Stopping hybrid recording");
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(true);
        }
        // The capture task closes the sink on its way out.
        if let Some(task) = self.capture_task.take() {
            let _ = task.await;
        }
        if let Some(task) = self.timer_task.take() {
            task.abort();
        }

        {
            let mut status = self.status.write();
            status.state = RecordingState::Idle;
            status.local_sink_active = false;
        }
        let _ = self.event_tx.send(RecordingEvent::Stopped);
        tracing::info!("Recording stopped");
    }

    async fn acquire_sink(&self) -> Option<Box<dyn LocalSink>> {
        match &self.sink_factory {
            Some(factory) => match factory.acquire().await {
                Ok(sink) => Some(sink),
                Err(err) => {
                    tracing::warn!(%err, "Local sink unavailable, falling back to cloud-only");
                    self.status.write().last_error =
                        Some(format!("Local sink unavailable: {err}"));
                    None
                }
            },
            None => {
                tracing::warn!("No local sink configured, recording cloud-only");
                None
            }
        }
    }
}

impl Drop for HybridRecorder {
    fn drop(&mut self) {
        if let Some(task) = self.capture_task.take() {
            task.abort();
        }
        if let Some(task) = self.timer_task.take() {
            task.abort();
        }
    }
}
