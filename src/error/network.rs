//! Network-related error types.
//!
//! Errors from the HTTP requests made against the pipeline server.

use std::fmt;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// DNS resolution failed.
    DnsResolutionFailed { host: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The response body was not what the endpoint promises.
    InvalidResponse { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Unable to reach the pipeline server at {}. Check if the backend is running.", url)
            }
            NetworkError::DnsResolutionFailed { host } => {
                format!("Could not resolve server address '{}'.", host)
            }
            NetworkError::Timeout { operation } => {
                format!("The {} timed out. The server may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 | 422 => "The server rejected the request. Check the query and try again.".to_string(),
                404 => "The requested run was not found.".to_string(),
                500..=599 => "The pipeline server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}). Please try again.", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::DnsResolutionFailed { .. } => "E_NET_DNS",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::DnsResolutionFailed { host } => {
                write!(f, "DNS resolution failed for '{}'", host)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        NetworkError::Timeout {
            operation: "HTTP request".to_string(),
        }
    } else if let Some(status) = err.status() {
        NetworkError::HttpStatus {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_decode() || err.is_body() {
        NetworkError::InvalidResponse {
            message: format!("Failed to decode response: {}", err),
        }
    } else {
        let err_str = err.to_string().to_lowercase();
        if err_str.contains("dns") || err_str.contains("resolve") {
            NetworkError::DnsResolutionFailed {
                host: extract_host_from_url(url),
            }
        } else {
            NetworkError::Other {
                message: err.to_string(),
            }
        }
    }
}

/// Extract the host portion from a URL string.
fn extract_host_from_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme
        .split(&['/', ':'][..])
        .next()
        .unwrap_or(url)
        .to_string()
}
