//! Markdown stripping over arbitrary JSON trees.
//!
//! The oracle habitually decorates string values with emphasis markers even
//! when told not to. Every string leaf of the detailed report, at any
//! nesting depth, gets scrubbed before the report is returned.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Bold markers, backtick runs, single/double underscores, strikethrough.
static MD_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*|`+|__?|~~)").expect("valid markdown-marker pattern"));

pub fn strip_markdown(text: &str) -> String {
    MD_MARKERS.replace_all(text, "").into_owned()
}

/// Recursively strips markdown from every string leaf of a JSON tree.
/// Arrays and objects are rebuilt with their element order intact; numbers,
/// booleans and nulls pass through untouched.
pub fn strip_markdown_tree(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_markdown(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_markdown_tree).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, strip_markdown_tree(inner)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_bold_and_code_markers() {
        assert_eq!(
            strip_markdown("**Strong** fit with `Python`"),
            "Strong fit with Python"
        );
    }

    #[test]
    fn test_strips_underscores_and_strikethrough() {
        assert_eq!(strip_markdown("_em_ __strong__ ~~gone~~"), "em strong gone");
    }

    #[test]
    fn test_strips_backtick_runs() {
        assert_eq!(strip_markdown("```rust fn``` and `x`"), "rust fn and x");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_markdown("no markers here."), "no markers here.");
    }

    #[test]
    fn test_tree_strips_nested_values() {
        let input = json!({
            "overall_assessment": "**Good** candidate",
            "recommendations": ["Add `Docker`", {"note": "__underline__"}],
            "ats_score": 85,
            "passed": true
        });
        let stripped = strip_markdown_tree(input);
        assert_eq!(stripped["overall_assessment"], "Good candidate");
        assert_eq!(stripped["recommendations"][0], "Add Docker");
        assert_eq!(stripped["recommendations"][1]["note"], "underline");
        assert_eq!(stripped["ats_score"], 85);
        assert_eq!(stripped["passed"], true);
    }
}
