//! Webhook response normalization.
//!
//! Workflow webhooks reply in whatever shape the workflow author chose. The
//! normalizer reduces any of them to one display string by trying a fixed,
//! ordered list of extractors against a candidate value. The first extractor
//! that accepts the candidate wins.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Display text plus the object it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// Empty when nothing readable was found.
    pub message: String,
    /// Always a JSON object.
    pub data: Value,
}

impl NormalizedResponse {
    fn empty() -> Self {
        Self {
            message: String::new(),
            data: Value::Object(Map::new()),
        }
    }
}

/// One way of reading a display string out of a candidate value.
trait Extractor: Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when the candidate does not have the expected shape.
    fn extract(&self, candidate: &Value) -> Option<NormalizedResponse>;
}

/// A named top-level field such as `output` or `answer`.
struct Field(&'static str);

impl Extractor for Field {
    fn name(&self) -> &'static str {
        self.0
    }

    fn extract(&self, candidate: &Value) -> Option<NormalizedResponse> {
        let message = field_text(candidate, self.0)?;
        Some(NormalizedResponse {
            data: json!({ "output": message }),
            message,
        })
    }
}

/// The candidate is itself a string.
struct PlainText;

impl Extractor for PlainText {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extract(&self, candidate: &Value) -> Option<NormalizedResponse> {
        match candidate {
            Value::String(s) if !s.is_empty() => Some(NormalizedResponse {
                message: s.clone(),
                data: json!({ "text": s }),
            }),
            _ => None,
        }
    }
}

/// Last resort: show the JSON itself, preferring a nested `data` field.
struct Serialized;

impl Extractor for Serialized {
    fn name(&self) -> &'static str {
        "serialized"
    }

    fn extract(&self, candidate: &Value) -> Option<NormalizedResponse> {
        let shown = match candidate.get("data") {
            Some(nested) if !nested.is_null() => nested,
            _ => candidate,
        };
        let data = match candidate {
            Value::Object(_) => candidate.clone(),
            other => json!({ "raw": other }),
        };
        Some(NormalizedResponse {
            message: shown.to_string(),
            data,
        })
    }
}

static RESPONSE_EXTRACTORS: &[&dyn Extractor] =
    &[&Field("output"), &Field("answer"), &PlainText, &Serialized];

/// Parses a raw response body: JSON when it parses, otherwise the text itself.
pub fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Reduces a webhook response body to a display string.
///
/// Never fails. An empty body (`null`, `""`, `[]`, `{}`) yields an empty
/// message and an empty `data` object.
pub fn normalize_response(body: &Value) -> NormalizedResponse {
    if is_empty(body) {
        return NormalizedResponse::empty();
    }

    let candidate = match body {
        Value::Array(items) if !items.is_empty() => &items[0],
        other => other,
    };

    RESPONSE_EXTRACTORS
        .iter()
        .find_map(|extractor| {
            let found = extractor.extract(candidate)?;
            debug!(extractor = extractor.name(), "normalized webhook response");
            Some(found)
        })
        .unwrap_or_else(NormalizedResponse::empty)
}

/// Best-effort readable text from a relay reply, used by clients when the
/// reply's own `message` is empty.
///
/// Looks for `output` then `answer` under `data`, on the payload itself and
/// on the first element of an array payload, then falls back to plain text
/// and finally to the serialized `data` (or payload).
pub fn readable_text(payload: &Value) -> String {
    if is_empty(payload) {
        return String::new();
    }

    let nested = payload.get("data");
    let first = payload.as_array().and_then(|items| items.first());

    for field in ["output", "answer"] {
        for candidate in [nested, Some(payload)].into_iter().flatten() {
            if let Some(text) = field_text(candidate, field) {
                return text;
            }
        }
    }
    for field in ["output", "answer"] {
        if let Some(text) = first.and_then(|f| field_text(f, field)) {
            return text;
        }
    }

    [&PlainText as &dyn Extractor, &Serialized]
        .iter()
        .find_map(|extractor| extractor.extract(payload))
        .map(|found| found.message)
        .unwrap_or_default()
}

fn field_text(candidate: &Value, field: &str) -> Option<String> {
    match candidate.get(field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(body: Value) -> String {
        normalize_response(&body).message
    }

    #[test]
    fn output_field_wins() {
        assert_eq!(message(json!({ "output": "hello" })), "hello");
        assert_eq!(
            message(json!({ "output": "first", "answer": "second" })),
            "first"
        );
    }

    #[test]
    fn answer_field_is_second_choice() {
        assert_eq!(message(json!({ "answer": "hi" })), "hi");
        assert_eq!(message(json!({ "output": "", "answer": "hi" })), "hi");
        assert_eq!(message(json!({ "output": null, "answer": "hi" })), "hi");
    }

    #[test]
    fn first_array_element_is_the_candidate() {
        assert_eq!(message(json!([{ "output": "x" }, { "output": "y" }])), "x");
        assert_eq!(message(json!([{ "answer": "a" }])), "a");
        assert_eq!(message(json!(["just text"])), "just text");
    }

    #[test]
    fn plain_string_body() {
        assert_eq!(message(json!("plain string")), "plain string");
        assert_eq!(message(parse_body("plain string")), "plain string");
    }

    #[test]
    fn unknown_shape_is_serialized() {
        assert_eq!(message(json!({ "foo": 1 })), r#"{"foo":1}"#);
        assert_eq!(
            message(json!({ "data": { "reply": "ok" }, "status": 1 })),
            r#"{"reply":"ok"}"#
        );
    }

    #[test]
    fn empty_inputs_give_empty_message() {
        for body in [json!(null), json!(""), json!("   "), json!([]), json!({})] {
            let normalized = normalize_response(&body);
            assert_eq!(normalized.message, "", "body: {body}");
            assert_eq!(normalized.data, json!({}));
        }
        assert_eq!(message(parse_body("")), "");
    }

    #[test]
    fn non_string_output_is_serialized() {
        assert_eq!(message(json!({ "output": 42 })), "42");
        assert_eq!(message(json!({ "output": { "a": true } })), r#"{"a":true}"#);
    }

    #[test]
    fn data_is_always_an_object() {
        let bodies = [
            json!({ "output": "hello" }),
            json!("text"),
            json!({ "foo": 1 }),
            json!([1, 2, 3]),
            json!(true),
            json!(7.5),
        ];
        for body in bodies {
            let normalized = normalize_response(&body);
            assert!(normalized.data.is_object(), "body: {body}");
        }
        assert_eq!(
            normalize_response(&json!({ "answer": "hi" })).data,
            json!({ "output": "hi" })
        );
        assert_eq!(
            normalize_response(&json!([5])).data,
            json!({ "raw": 5 })
        );
    }

    #[test]
    fn parse_body_falls_back_to_text() {
        assert_eq!(parse_body(r#"{"output":"x"}"#), json!({ "output": "x" }));
        assert_eq!(parse_body("<html>oops</html>"), json!("<html>oops</html>"));
    }

    #[test]
    fn readable_text_prefers_nested_data() {
        assert_eq!(
            readable_text(&json!({ "data": { "output": "inner" }, "output": "outer" })),
            "inner"
        );
        assert_eq!(readable_text(&json!({ "answer": "top" })), "top");
        assert_eq!(readable_text(&json!([{ "answer": "arr" }])), "arr");
        assert_eq!(readable_text(&json!("text")), "text");
        assert_eq!(
            readable_text(&json!({ "ok": true, "data": { "x": 1 } })),
            r#"{"x":1}"#
        );
        assert_eq!(readable_text(&json!(null)), "");
    }
}
