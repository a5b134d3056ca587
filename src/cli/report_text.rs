//! Plain-text rendering of a report for stdout.

use std::fmt::Write;

use crate::models::Report;

/// Shown above raw output when no structured object could be recovered.
pub const UNSTRUCTURED_NOTICE: &str =
    "Unable to parse structured report. Showing raw output instead.";

/// Render the structured view of a report, or its raw output with a notice.
pub fn report_text(report: &Report) -> String {
    let Some(structured) = report.structured() else {
        return format!("{}\n\n{}\n", UNSTRUCTURED_NOTICE, report.raw_output());
    };

    let mut out = String::new();
    if let Some(title) = structured.title() {
        let _ = writeln!(out, "# {}\n", title);
    }
    if let Some(summary) = structured.summary() {
        let _ = writeln!(out, "{}\n", summary);
    }
    for (heading, items) in [
        ("Key points", structured.key_points()),
        ("Limitations", structured.limitations()),
    ] {
        let Some(items) = items.filter(|items| !items.is_empty()) else {
            continue;
        };
        let _ = writeln!(out, "{}:", heading);
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
        out.push('\n');
    }
    out
}
