//! HalTalks Error Types
//!
//! Centralized error handling for the library surface.

use thiserror::Error;

/// Central error type for HalTalks
#[derive(Error, Debug)]
pub enum HalError {
    #[error("TTS engine error: {0}")]
    Tts(String),

    #[error("Rule table error: {0}")]
    Rules(String),

    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Speech queue is shut down")]
    QueueClosed,

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for HalTalks operations
pub type HalResult<T> = Result<T, HalError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for HalError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        HalError::Lock(err.to_string())
    }
}
