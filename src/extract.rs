//! Best-effort recovery of a JSON object embedded in free-form text.
//!
//! Model output frequently wraps the report object in prose or a markdown
//! fence. [`extract_first_json`] locates the first brace-balanced `{...}` span
//! and parses it.
//!
//! # Known limitation
//!
//! Braces are counted without regard to JSON string literals. A `}` inside a
//! quoted value can close the span early, which makes the parse fail (or, in
//! rare cases, yields a truncated object). Only one candidate is ever tried:
//! when the first balanced span does not parse, the result is `None` even if
//! a later span would have.

use serde_json::{Map, Value};

/// Extract the first brace-balanced JSON object from `raw`.
///
/// Returns `None` when the text has no `{`, when the braces never balance,
/// or when the first balanced span is not valid JSON.
pub fn extract_first_json(raw: &str) -> Option<Map<String, Value>> {
    let span = first_balanced_span(raw)?;
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("embedded JSON candidate did not parse: {}", e);
            None
        }
    }
}

/// Byte range of the first `{` through the `}` that brings depth back to zero.
fn first_balanced_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth: usize = 0;

    // '{' and '}' are ASCII, so byte offsets are always char boundaries here
    for (offset, byte) in raw.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
