//! Text and JSON renderers for change reports.

use crate::diff::model::ChangeReport;
use crate::errors::Result;

/// Printed when the two documents have no differences
pub const NO_CHANGES: &str = "No changes found.";

/// Render the line-oriented text report
///
/// One `<symbol> <path>` line per change followed by its details, each
/// indented by four spaces. Every line ends with a newline.
///
/// A single space separates the symbol from the path (`! Root/Work/Mail`).
pub fn render_human_summary(report: &ChangeReport) -> String {
    if report.is_empty() {
        return format!("{}\n", NO_CHANGES);
    }

    let mut out = String::new();
    for change in &report.changes {
        out.push(change.kind.symbol());
        out.push(' ');
        out.push_str(&change.path);
        out.push('\n');
        for detail in &change.details {
            out.push_str("    ");
            out.push_str(detail);
            out.push('\n');
        }
    }
    out
}

/// Render the structured report as pretty-printed JSON
///
/// # Errors
///
/// Returns `Serialization` if the report cannot be encoded.
pub fn render_json(report: &ChangeReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
