//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, or a stream that dropped.
    Network,

    /// The pipeline server answered with an error or broke protocol.
    Server,

    /// Invalid input such as an empty query or unknown run id.
    User,

    /// Filesystem and terminal errors.
    System,

    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the pipeline server is running and reachable",
            ErrorCategory::Server => "The server may be experiencing issues. Run the workflow again",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check the AGENTDASH_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
