//! Unified error type for agentdash.

use std::fmt;

use super::category::ErrorCategory;
use super::network::{classify_reqwest_error, NetworkError};
use super::stream::StreamError;
use crate::client::ClientError;

/// Unified error type for the dashboard and headless runner.
#[derive(Debug)]
pub enum DashError {
    /// HTTP errors against the pipeline server.
    Network(NetworkError),

    /// Event stream errors.
    Stream(StreamError),

    /// Invalid settings or arguments.
    Config { message: String },

    /// A run ended without a report.
    RunFailed { message: String },

    /// Filesystem and terminal I/O.
    Io(std::io::Error),
}

impl DashError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                ErrorCategory::User
            }
            DashError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Server,
            DashError::Network(_) => ErrorCategory::Network,
            DashError::Stream(StreamError::InvalidEvent { .. }) => ErrorCategory::Server,
            DashError::Stream(_) => ErrorCategory::Network,
            DashError::Config { .. } => ErrorCategory::Configuration,
            DashError::RunFailed { .. } => ErrorCategory::Network,
            DashError::Io(_) => ErrorCategory::System,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DashError::Network(err) => err.user_message(),
            DashError::Stream(err) => err.user_message(),
            DashError::Config { message } => format!("Configuration error: {}", message),
            DashError::RunFailed { message } => message.clone(),
            DashError::Io(err) => format!("I/O error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DashError::Network(err) => err.error_code(),
            DashError::Stream(err) => err.error_code(),
            DashError::Config { .. } => "E_CONFIG",
            DashError::RunFailed { .. } => "E_RUN",
            DashError::Io(_) => "E_IO",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashError::Network(err) => write!(f, "{}", err),
            DashError::Stream(err) => write!(f, "{}", err),
            DashError::Config { message } => write!(f, "Configuration error: {}", message),
            DashError::RunFailed { message } => write!(f, "Run failed: {}", message),
            DashError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for DashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashError::Network(err) => Some(err),
            DashError::Stream(err) => Some(err),
            DashError::Config { .. } | DashError::RunFailed { .. } => None,
            DashError::Io(err) => Some(err),
        }
    }
}

impl From<NetworkError> for DashError {
    fn from(err: NetworkError) -> Self {
        DashError::Network(err)
    }
}

impl From<StreamError> for DashError {
    fn from(err: StreamError) -> Self {
        DashError::Stream(err)
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        DashError::Io(err)
    }
}

impl From<ClientError> for DashError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => {
                let url = e.url().map(|u| u.to_string()).unwrap_or_default();
                DashError::Network(classify_reqwest_error(&e, &url))
            }
            ClientError::ServerError { status, message } => {
                DashError::Network(NetworkError::HttpStatus { status, message })
            }
            ClientError::Json(e) => DashError::Network(NetworkError::InvalidResponse {
                message: e.to_string(),
            }),
            ClientError::SseParse(e) => DashError::Stream(StreamError::InvalidEvent {
                message: e.to_string(),
            }),
            ClientError::Disconnected { message } => {
                DashError::Stream(StreamError::ConnectionLost { message })
            }
        }
    }
}
