//! Streaming-related error types.
//!
//! Errors that end or disturb a run's event stream.

use thiserror::Error;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The transport failed while the stream was open.
    #[error("stream connection lost: {message}")]
    ConnectionLost { message: String },

    /// The server closed the stream before sending a final report.
    #[error("server closed the stream before the final report")]
    ServerClosed,

    /// A message could not be turned into a pipeline event.
    #[error("invalid event: {message}")]
    InvalidEvent { message: String },
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } | StreamError::ServerClosed => {
                "Stream connection lost. Check if the backend is running.".to_string()
            }
            StreamError::InvalidEvent { message } => {
                format!("Received an unexpected event from the server: {}", message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::ServerClosed => "E_STREAM_CLOSED",
            StreamError::InvalidEvent { .. } => "E_STREAM_EVENT",
        }
    }
}
