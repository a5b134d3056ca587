//! SSE (Server-Sent Events) stream parser
//!
//! Parses the pipeline server's event stream. SSE format consists of:
//! - `event: <type>` - event type line (optional, the JSON `type` field wins)
//! - `data: <json>` - data payload line(s)
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments and keepalives (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (PipelineEvent, SseLine, SseParseError)
//! - `payloads` - Wire payload deserialization struct
//! - `parser` - Parsing logic (SseParser, parse_sse_line, parse_pipeline_event)
//! - `lines` - Byte chunk to line splitting

mod events;
mod lines;
mod parser;
mod payloads;

pub use events::{PipelineEvent, SseLine, SseParseError};
pub use lines::LineBuffer;
pub use parser::{parse_pipeline_event, parse_sse_line, SseParser};
