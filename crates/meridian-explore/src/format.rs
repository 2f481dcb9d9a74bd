//! Rendering of natural-language query result rows.
//!
//! Rows are transient: formatted once for display and discarded, never
//! merged into the graph. Formatting is pure and independent of row order
//! or repetition.

use serde_json::Value;

use meridian_core::identity::{display_literal, NOT_AVAILABLE};

/// Render one result row as a readable line.
///
/// A row carrying `subject`, `predicate`, and `object` fields renders as
/// `<subj> --[<pred>]--> <obj>`, each part humanized (IRIs reduced to their
/// local name with underscores as spaces) and missing or empty parts shown
/// as `N/A`. Any other shape renders as its verbatim JSON.
pub fn format_row(row: &Value) -> String {
    if let Value::Object(fields) = row {
        if let (Some(subject), Some(predicate), Some(object)) = (
            fields.get("subject"),
            fields.get("predicate"),
            fields.get("object"),
        ) {
            return format!(
                "{} --[{}]--> {}",
                part(subject),
                part(predicate),
                part(object)
            );
        }
    }
    row.to_string()
}

fn part(value: &Value) -> String {
    match value {
        Value::String(s) => display_literal(s),
        Value::Null => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}
