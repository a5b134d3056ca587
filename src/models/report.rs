//! Final report payload and the views derived from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extract::extract_first_json;

/// Opaque report object delivered by the terminal `final_report` event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(pub Map<String, Value>);

impl Report {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Text the pipeline produced.
    ///
    /// The server wraps unparseable model output as `{"raw_output": "..."}`;
    /// any other report is shown as its pretty-printed JSON.
    pub fn raw_output(&self) -> String {
        match self.0.get("raw_output") {
            Some(Value::String(raw)) => raw.clone(),
            _ => serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    /// Structured breakdown recovered from [`Report::raw_output`], if any.
    pub fn structured(&self) -> Option<StructuredReport> {
        extract_first_json(&self.raw_output()).map(StructuredReport)
    }
}

impl From<Map<String, Value>> for Report {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The JSON object recovered from free-form report text.
///
/// Every key is preserved; the accessors expose the ones the dashboard renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredReport(pub Map<String, Value>);

impl StructuredReport {
    pub fn title(&self) -> Option<&str> {
        non_empty_str(self.0.get("title"))
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty_str(self.0.get("summary"))
    }

    pub fn key_points(&self) -> Option<Vec<String>> {
        string_list(self.0.get("key_points"))
    }

    pub fn limitations(&self) -> Option<Vec<String>> {
        string_list(self.0.get("limitations"))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// A JSON array rendered as one string per element.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: Value) -> Report {
        match value {
            Value::Object(map) => Report::new(map),
            _ => panic!("test report must be an object"),
        }
    }

    #[test]
    fn test_raw_output_prefers_string_field() {
        let r = report(json!({"raw_output": "hello {\"title\": \"T\"}"}));
        assert_eq!(r.raw_output(), "hello {\"title\": \"T\"}");
    }

    #[test]
    fn test_raw_output_falls_back_to_pretty_json() {
        let r = report(json!({"title": "T", "summary": "S"}));
        let raw = r.raw_output();
        assert!(raw.contains('\n'));
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, json!({"title": "T", "summary": "S"}));
    }

    #[test]
    fn test_non_string_raw_output_serializes_whole_report() {
        let r = report(json!({"raw_output": 42}));
        let parsed: Value = serde_json::from_str(&r.raw_output()).unwrap();
        assert_eq!(parsed, json!({"raw_output": 42}));
    }

    #[test]
    fn test_structured_from_embedded_text() {
        let r = report(json!({
            "raw_output": "Sure! {\"title\":\"T\",\"summary\":\"S\",\"key_points\":[\"a\",\"b\"]} Done."
        }));
        let s = r.structured().unwrap();
        assert_eq!(s.title(), Some("T"));
        assert_eq!(s.summary(), Some("S"));
        assert_eq!(s.key_points(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(s.limitations(), None);
    }

    #[test]
    fn test_structured_from_already_parsed_report() {
        let r = report(json!({"title": "T", "limitations": ["slow"]}));
        let s = r.structured().unwrap();
        assert_eq!(s.title(), Some("T"));
        assert_eq!(s.limitations(), Some(vec!["slow".to_string()]));
    }

    #[test]
    fn test_structured_absent_for_plain_text() {
        let r = report(json!({"raw_output": "The model refused to answer."}));
        assert!(r.structured().is_none());
    }

    #[test]
    fn test_unrecognized_keys_are_kept() {
        let r = report(json!({"raw_output": "{\"title\":\"T\",\"score\":3}"}));
        let s = r.structured().unwrap();
        assert_eq!(s.fields().get("score"), Some(&json!(3)));
    }

    #[test]
    fn test_non_string_list_items_are_stringified() {
        let s = StructuredReport(
            json!({"key_points": ["a", 2, true]}).as_object().unwrap().clone(),
        );
        assert_eq!(
            s.key_points(),
            Some(vec!["a".to_string(), "2".to_string(), "true".to_string()])
        );
    }

    #[test]
    fn test_empty_title_treated_as_absent() {
        let s = StructuredReport(json!({"title": ""}).as_object().unwrap().clone());
        assert_eq!(s.title(), None);
    }
}
