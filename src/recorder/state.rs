//! Recording state
//!
//! Status snapshot the renderer and operator surface read.

use serde::{Deserialize, Serialize};

/// Current state of the recording pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No recording in progress
    Idle,
    /// Currently recording
    Recording,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Read-only recorder status
///
/// `elapsed_seconds` increments once per second while recording and persists
/// after stop until the next start resets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderStatus {
    pub state: RecordingState,

    pub elapsed_seconds: u64,

    /// Chunks handed to the remote store so far
    pub chunk_count: u64,

    /// False when running in cloud-only (degraded) mode
    pub local_sink_active: bool,

    /// Last user-visible error, acquisition failures only
    pub last_error: Option<String>,
}

impl RecorderStatus {
    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }
}

impl Default for RecorderStatus {
    fn default() -> Self {
        Self {
            state: RecordingState::Idle,
            elapsed_seconds: 0,
            chunk_count: 0,
            local_sink_active: false,
            last_error: None,
        }
    }
}
