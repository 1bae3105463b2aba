//! Shared helpers for tool use cases.

use toolkit_domain::ToolCall;

/// Extract a short preview string from tool call arguments.
///
/// Looks for well-known keys (`query`, `url`) first, then falls back to the
/// first string value found. Unparseable arguments preview as the raw text.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    let Ok(args) = call.parse_arguments() else {
        return truncate_preview(call.arguments.trim(), 50);
    };
    for key in ["query", "url"] {
        if let Some(serde_json::Value::String(s)) = args.get(key) {
            return truncate_preview(s, 50);
        }
    }
    // Fallback: first string value
    for value in args.values() {
        if let Some(s) = value.as_str() {
            return truncate_preview(s, 50);
        }
    }
    String::new()
}

/// Truncate to at most `max_len` characters, ending with `…` when cut.
pub(crate) fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
