//! JSON wire models shared by the relay service and its clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// `GET /api/config` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub configured: bool,
}

/// `POST /api/sendMessage` request. Every field is optional on the wire.
///
/// Fields are read leniently: numbers and booleans become their text, and
/// any other non-string value counts as absent instead of failing the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub webhook_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub medico_nome: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub medico_id: Option<String>,
}

// Accepts any JSON value; keeps strings, stringifies numbers and booleans.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// `POST /api/sendMessage` success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub ok: bool,
    /// HTTP status the webhook answered with.
    pub response_status: u16,
    pub message: String,
    pub data: Value,
}

/// 400 body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 500 body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub ok: bool,
    pub error: String,
}
