//! Wire payload of a single pipeline event.

use serde::Deserialize;
use serde_json::Value;

/// JSON carried in an SSE `data:` payload.
///
/// Every field is optional on the wire; which ones are required depends on
/// `type` and is checked when converting to a `PipelineEvent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EventPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}
