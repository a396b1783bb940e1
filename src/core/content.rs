//! Rendered tool and resource output, independent of the wire protocol types.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Text body returned from a tool call. `is_error` marks a declined or failed
/// operation that is still delivered as normal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// Inline content of a resource read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOutput {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Pretty-print a payload the way every tool and resource body is rendered.
pub fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Current UTC time as RFC 3339 with milliseconds, e.g. `2024-05-01T12:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_with_indentation() {
        let s = pretty(&serde_json::json!({"a": 1}));
        assert_eq!(s, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn failure_sets_flag() {
        assert!(ToolOutput::failure("x").is_error);
        assert!(!ToolOutput::ok("x").is_error);
    }

    #[test]
    fn timestamps_are_utc_with_millis() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'), "{ts}");
        let parsed = chrono::DateTime::parse_from_rfc3339(&ts).unwrap();
        assert_eq!(parsed.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(ts.len(), "2024-05-01T12:00:00.000Z".len());
    }
}
