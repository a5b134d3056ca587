//! Request and response bodies for the pipeline HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRequest {
    pub query: String,
}

impl RunRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Response of `POST /run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResponse {
    pub run_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_serialization() {
        let json = serde_json::to_string(&RunRequest::new("trends")).unwrap();
        assert_eq!(json, r#"{"query":"trends"}"#);
    }

    #[test]
    fn test_run_response_ignores_extra_fields() {
        let resp: RunResponse =
            serde_json::from_str(r#"{"run_id":"abc-123","status":"queued"}"#).unwrap();
        assert_eq!(resp.run_id, "abc-123");
    }
}
