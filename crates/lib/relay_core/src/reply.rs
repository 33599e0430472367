//! Reply presentation for chat clients.

use serde_json::Value;

use crate::normalize::readable_text;

/// Shown instead of an empty bot reply.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response from the webhook.";

/// Wraps a reply in parentheses unless it already is.
///
/// The input is trimmed first. Empty input stays empty, so callers can still
/// tell "nothing came back" apart from a real reply.
pub fn format_reply(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('(') && trimmed.ends_with(')') {
        trimmed.to_string()
    } else {
        format!("({trimmed})")
    }
}

/// Bot-side text for a relay reply: its `message`, or a readable extraction
/// of the whole reply, formatted, or the placeholder when nothing is left.
pub fn display_reply(reply: &Value) -> String {
    let message = match reply.get("message").and_then(Value::as_str) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => readable_text(reply),
    };
    let formatted = format_reply(&message);
    if formatted.is_empty() {
        NO_RESPONSE_PLACEHOLDER.to_string()
    } else {
        formatted
    }
}
