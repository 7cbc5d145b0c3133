//! Error types for the notification layer

use thiserror::Error;

/// Result type alias for notification operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Top-level error for configuration and sink wiring
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Sink error
    #[error("sink '{sink}' error: {message}")]
    Sink { sink: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for sink operations
///
/// Variants never escape a sink: each one is logged at debug level and
/// swallowed at the sink boundary, so dispatch to the remaining sinks and
/// the caller's control flow are unaffected.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Collector connection could not be established
    #[error("connection error: {0}")]
    Connect(String),

    /// Datagram could not be sent
    #[error("send failed: {0}")]
    Send(String),

    /// Reaper-state tag could not be persisted
    #[error("tag update failed: {0}")]
    Tag(String),
}

impl From<SinkError> for NotifyError {
    fn from(err: SinkError) -> Self {
        NotifyError::Sink {
            sink: "unknown".to_string(),
            message: err.to_string(),
        }
    }
}
