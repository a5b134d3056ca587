//! SSE stream parsing logic
//!
//! Contains the stateful SseParser for accumulating lines and emitting events,
//! as well as the payload-to-event conversion.

use serde_json::{Map, Value};

use crate::models::Report;
use crate::sse::events::{PipelineEvent, SseLine, SseParseError};
use crate::sse::payloads::EventPayload;

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        // Only the single space after the colon belongs to the framing
        let value = rest.strip_prefix(' ').unwrap_or(rest);
        return SseLine::Data(value.to_string());
    }

    // id:, retry: and unknown fields carry nothing we use
    SseLine::Comment(line.to_string())
}

/// Convert one `data:` payload into a typed event.
///
/// `event_name` is the SSE `event:` field, used only when the JSON has no
/// `type`. A payload with neither becomes [`PipelineEvent::Unknown`].
pub fn parse_pipeline_event(
    event_name: Option<&str>,
    data: &str,
) -> Result<PipelineEvent, SseParseError> {
    let label = event_name.unwrap_or("message");
    let payload: EventPayload =
        serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
            event_type: label.to_string(),
            source: e.to_string(),
        })?;

    let kind = match payload.kind.as_deref().or(event_name) {
        Some(kind) => kind.to_string(),
        None => {
            return Ok(PipelineEvent::Unknown {
                kind: String::new(),
            })
        }
    };

    match kind.as_str() {
        "agent_started" => Ok(PipelineEvent::AgentStarted {
            agent: require_agent(&kind, payload.agent)?,
        }),
        "tool_called" => Ok(PipelineEvent::ToolCalled {
            agent: require_agent(&kind, payload.agent)?,
            tool: payload.tool,
        }),
        "agent_completed" => Ok(PipelineEvent::AgentCompleted {
            agent: require_agent(&kind, payload.agent)?,
        }),
        "final_report" => Ok(PipelineEvent::FinalReport {
            report: report_from_data(&kind, payload.data)?,
        }),
        // Unknown kinds are passed through so newer servers don't break the stream
        _ => Ok(PipelineEvent::Unknown { kind }),
    }
}

fn require_agent(event_type: &str, agent: Option<String>) -> Result<String, SseParseError> {
    agent.ok_or_else(|| SseParseError::MissingField {
        event_type: event_type.to_string(),
        field: "agent",
    })
}

/// `data` of a final report: an object, a bare string (kept as `raw_output`), or nothing.
fn report_from_data(event_type: &str, data: Option<Value>) -> Result<Option<Report>, SseParseError> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(Report::new(map))),
        Some(Value::String(raw)) => {
            let mut map = Map::new();
            map.insert("raw_output".to_string(), Value::String(raw));
            Ok(Some(Report::new(map)))
        }
        Some(_) => Err(SseParseError::InvalidField {
            event_type: event_type.to_string(),
            field: "data",
            expected: "object",
        }),
    }
}

/// Stateful SSE parser that accumulates lines and emits complete events
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event name being accumulated
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete event
    ///
    /// Returns:
    /// - `Ok(Some(event))` - A complete event was parsed
    /// - `Ok(None)` - Line was consumed but event is incomplete
    /// - `Err(error)` - Parse error occurred
    pub fn feed_line(&mut self, line: &str) -> Result<Option<PipelineEvent>, SseParseError> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                Ok(None)
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                Ok(None)
            }
            SseLine::Empty => self.try_emit_event(),
            SseLine::Comment(_) => Ok(None),
        }
    }

    /// Try to emit a complete event from accumulated state
    fn try_emit_event(&mut self) -> Result<Option<PipelineEvent>, SseParseError> {
        if self.current_event_type.is_none() && self.data_buffer.is_empty() {
            return Ok(None);
        }

        let event_type = self.current_event_type.take();
        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();

        // "message" is the SSE default name and says nothing about the payload
        let event_name = event_type.as_deref().filter(|name| *name != "message");

        if data.is_empty() {
            return Err(SseParseError::MissingData {
                event_type: event_name.unwrap_or("message").to_string(),
            });
        }

        parse_pipeline_event(event_name, &data).map(Some)
    }

    /// Whether lines of an unfinished event are buffered
    pub fn has_pending(&self) -> bool {
        self.current_event_type.is_some() || !self.data_buffer.is_empty()
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Tests for parse_sse_line

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": ping - 2024-01-01 00:00:00"),
            SseLine::Comment("ping - 2024-01-01 00:00:00".to_string())
        );
    }

    #[test]
    fn test_parse_event_and_data_lines() {
        assert_eq!(
            parse_sse_line("event:   message  "),
            SseLine::Event("message".to_string())
        );
        assert_eq!(
            parse_sse_line(r#"data:{"type":"agent_started"}"#),
            SseLine::Data(r#"{"type":"agent_started"}"#.to_string())
        );
    }

    #[test]
    fn test_data_keeps_all_but_one_leading_space() {
        assert_eq!(parse_sse_line("data:  indented "), SseLine::Data(" indented ".to_string()));
        assert_eq!(parse_sse_line("data:"), SseLine::Data(String::new()));
    }

    #[test]
    fn test_parse_id_line_is_ignored() {
        assert_eq!(
            parse_sse_line("id: 42"),
            SseLine::Comment("id: 42".to_string())
        );
    }

    // Tests for parse_pipeline_event

    #[test]
    fn test_parse_agent_started() {
        let event =
            parse_pipeline_event(None, r#"{"type":"agent_started","agent":"Research Agent"}"#)
                .unwrap();
        assert_eq!(
            event,
            PipelineEvent::AgentStarted {
                agent: "Research Agent".to_string()
            }
        );
    }

    #[test]
    fn test_parse_tool_called_with_and_without_tool() {
        let event = parse_pipeline_event(
            None,
            r#"{"type":"tool_called","agent":"Research Agent","tool":"web_search"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            PipelineEvent::ToolCalled {
                agent: "Research Agent".to_string(),
                tool: Some("web_search".to_string()),
            }
        );

        let event =
            parse_pipeline_event(None, r#"{"type":"tool_called","agent":"Research Agent"}"#)
                .unwrap();
        assert!(matches!(event, PipelineEvent::ToolCalled { tool: None, .. }));
    }

    #[test]
    fn test_parse_final_report_object() {
        let event = parse_pipeline_event(
            None,
            r#"{"type":"final_report","data":{"raw_output":"text"}}"#,
        )
        .unwrap();
        match event {
            PipelineEvent::FinalReport { report: Some(report) } => {
                assert_eq!(report.fields().get("raw_output"), Some(&json!("text")));
            }
            other => panic!("Expected FinalReport, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_final_report_without_data() {
        let event = parse_pipeline_event(None, r#"{"type":"final_report"}"#).unwrap();
        assert_eq!(event, PipelineEvent::FinalReport { report: None });

        let event = parse_pipeline_event(None, r#"{"type":"final_report","data":null}"#).unwrap();
        assert_eq!(event, PipelineEvent::FinalReport { report: None });
    }

    #[test]
    fn test_parse_final_report_string_data_becomes_raw_output() {
        let event =
            parse_pipeline_event(None, r#"{"type":"final_report","data":"plain"}"#).unwrap();
        match event {
            PipelineEvent::FinalReport { report: Some(report) } => {
                assert_eq!(report.raw_output(), "plain");
            }
            other => panic!("Expected FinalReport, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_final_report_rejects_array_data() {
        let result = parse_pipeline_event(None, r#"{"type":"final_report","data":[1,2]}"#);
        assert!(matches!(
            result,
            Err(SseParseError::InvalidField { field: "data", .. })
        ));
    }

    #[test]
    fn test_missing_agent_is_an_error() {
        let result = parse_pipeline_event(None, r#"{"type":"agent_completed"}"#);
        assert_eq!(
            result,
            Err(SseParseError::MissingField {
                event_type: "agent_completed".to_string(),
                field: "agent",
            })
        );
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let event = parse_pipeline_event(None, r#"{"type":"agent_paused","agent":"X"}"#).unwrap();
        assert_eq!(
            event,
            PipelineEvent::Unknown {
                kind: "agent_paused".to_string()
            }
        );
    }

    #[test]
    fn test_event_name_used_when_type_missing() {
        let event = parse_pipeline_event(Some("agent_started"), r#"{"agent":"A"}"#).unwrap();
        assert_eq!(
            event,
            PipelineEvent::AgentStarted {
                agent: "A".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_pipeline_event(None, "not json");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    // Tests for SseParser

    #[test]
    fn test_parser_data_only_event() {
        let mut parser = SseParser::new();

        assert!(parser
            .feed_line(r#"data: {"type":"agent_started","agent":"A"}"#)
            .unwrap()
            .is_none());
        let event = parser.feed_line("").unwrap();
        assert_eq!(
            event,
            Some(PipelineEvent::AgentStarted {
                agent: "A".to_string()
            })
        );
    }

    #[test]
    fn test_parser_default_message_name_defers_to_json_type() {
        let mut parser = SseParser::new();

        parser.feed_line("event: message").unwrap();
        parser
            .feed_line(r#"data: {"type":"agent_completed","agent":"A"}"#)
            .unwrap();
        let event = parser.feed_line("").unwrap();
        assert_eq!(
            event,
            Some(PipelineEvent::AgentCompleted {
                agent: "A".to_string()
            })
        );
    }

    #[test]
    fn test_parser_multiline_data_is_joined() {
        let mut parser = SseParser::new();

        parser.feed_line(r#"data: {"type":"tool_called","#).unwrap();
        parser.feed_line(r#"data: "agent":"A","tool":"t"}"#).unwrap();
        let event = parser.feed_line("").unwrap();
        assert_eq!(
            event,
            Some(PipelineEvent::ToolCalled {
                agent: "A".to_string(),
                tool: Some("t".to_string()),
            })
        );
    }

    #[test]
    fn test_parser_ignores_comments_and_blank_runs() {
        let mut parser = SseParser::new();

        assert!(parser.feed_line(": ping").unwrap().is_none());
        assert!(parser.feed_line("").unwrap().is_none());
        assert!(parser.feed_line("").unwrap().is_none());
    }

    #[test]
    fn test_parser_event_without_data_is_error() {
        let mut parser = SseParser::new();

        parser.feed_line("event: agent_started").unwrap();
        let result = parser.feed_line("");
        assert!(matches!(result, Err(SseParseError::MissingData { .. })));
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let mut parser = SseParser::new();

        parser.feed_line("data: garbage").unwrap();
        assert!(parser.feed_line("").is_err());

        parser
            .feed_line(r#"data: {"type":"agent_started","agent":"A"}"#)
            .unwrap();
        assert!(parser.feed_line("").unwrap().is_some());
    }

    #[test]
    fn test_reset() {
        let mut parser = SseParser::new();

        parser
            .feed_line(r#"data: {"type":"agent_started","agent":"A"}"#)
            .unwrap();
        parser.reset();

        assert!(parser.feed_line("").unwrap().is_none());
    }
}
