//! Error types and handling
//!
//! Common error types used across the console core.

use crate::recorder::channel::RecordingError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_on_io() -> AppResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
        Ok(())
    }

    #[test]
    fn wraps_underlying_errors() {
        let err = fails_on_io().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("gone"));

        let err: AppError = RecordingError::NoStream.into();
        assert!(matches!(err, AppError::Recording(RecordingError::NoStream)));
    }
}
