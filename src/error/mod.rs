//! Unified error handling for agentdash.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `DashError` consolidates all error types
//! - **Result Type Alias**: `DashResult<T>` for consistent return types
//!
//! Nothing is retried automatically; a failed run ends and the user starts
//! a new one.
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Connection, DNS, timeout, dropped stream |
//! | Server | Backend errors, protocol drift |
//! | User | Bad query or unknown run id |
//! | System | OS/filesystem errors |
//! | Configuration | Config issues |

mod category;
mod dash_error;
mod network;
mod stream;

pub use category::ErrorCategory;
pub use dash_error::DashError;
pub use network::{classify_reqwest_error, NetworkError};
pub use stream::StreamError;

/// Type alias for Results using DashError.
pub type DashResult<T> = Result<T, DashError>;
