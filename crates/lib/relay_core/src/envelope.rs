//! Outbound webhook envelope.
//!
//! The receiving workflow expects a messaging-platform `messages.upsert`
//! event, so a chat message is dressed up as one. Fields that make no sense
//! for a web chat are still emitted as `null` or `{}` because the consumer
//! pattern-matches on their presence.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Display name used when the client does not send one.
pub const DEFAULT_DISPLAY_NAME: &str = "Médico";

/// Sender id used when the client does not send one.
pub const DEFAULT_DISPLAY_ID: &str = "doctor-uid-001";

/// Envelope construction errors.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Cosmetic identity of the fake platform instance.
#[derive(Clone, Debug)]
pub struct EnvelopeProfile {
    pub instance: String,
    pub user_agent: String,
    pub server_url: String,
    pub api_key: String,
}

impl Default for EnvelopeProfile {
    fn default() -> Self {
        Self {
            instance: "dr-sof-web".into(),
            user_agent: "dr-sof-web/1.0".into(),
            server_url: "https://dr-sof.local".into(),
            api_key: "dr-sof-demo-key".into(),
        }
    }
}

/// Inputs for a single envelope.
#[derive(Clone, Debug)]
pub struct EnvelopeParams<'a> {
    pub text: &'a str,
    pub display_name: &'a str,
    pub display_id: &'a str,
    pub destination_url: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEnvelope {
    pub headers: EnvelopeHeaders,
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: EventBody,
    pub webhook_url: String,
    pub execution_mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeHeaders {
    pub host: String,
    #[serde(rename = "user-agent")]
    pub user_agent: String,
    #[serde(rename = "content-type")]
    pub content_type: &'static str,
}

/// Platform event wrapper. Keys are snake_case on the wire for this level.
#[derive(Debug, Clone, Serialize)]
pub struct EventBody {
    pub event: &'static str,
    pub instance: String,
    pub data: MessageEvent,
    pub destination: String,
    pub date_time: String,
    pub sender: String,
    pub server_url: String,
    pub apikey: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub key: MessageKey,
    pub push_name: String,
    pub status: &'static str,
    pub message: ConversationMessage,
    pub context_info: Option<Value>,
    pub message_type: &'static str,
    pub message_timestamp: i64,
    pub instance_id: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub remote_jid: &'static str,
    pub from_me: bool,
    pub id: String,
    pub sender_lid: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub conversation: String,
    pub message_context_info: Map<String, Value>,
}

impl OutboundEnvelope {
    /// Synthetic message id carried in `body.data.key.id`.
    pub fn message_id(&self) -> &str {
        &self.body.data.key.id
    }
}

/// Builds a fresh envelope stamped with the current time.
pub fn build_envelope(
    profile: &EnvelopeProfile,
    params: &EnvelopeParams<'_>,
) -> Result<OutboundEnvelope, EnvelopeError> {
    build_envelope_at(profile, params, Utc::now())
}

fn build_envelope_at(
    profile: &EnvelopeProfile,
    params: &EnvelopeParams<'_>,
    now: DateTime<Utc>,
) -> Result<OutboundEnvelope, EnvelopeError> {
    let host = destination_host(params.destination_url)?;

    Ok(OutboundEnvelope {
        headers: EnvelopeHeaders {
            host,
            user_agent: profile.user_agent.clone(),
            content_type: "application/json",
        },
        params: Map::new(),
        query: Map::new(),
        body: EventBody {
            event: "messages.upsert",
            instance: profile.instance.clone(),
            data: MessageEvent {
                key: MessageKey {
                    remote_jid: "site",
                    from_me: false,
                    id: synthetic_message_id(),
                    sender_lid: format!("{}@lid", params.display_id),
                },
                push_name: params.display_name.to_string(),
                status: "DELIVERY_ACK",
                message: ConversationMessage {
                    conversation: params.text.to_string(),
                    message_context_info: Map::new(),
                },
                context_info: None,
                message_type: "conversation",
                message_timestamp: now.timestamp(),
                instance_id: "web-instance",
                source: "web",
            },
            destination: params.destination_url.to_string(),
            date_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            sender: format!("{}@s.whatsapp.net", params.display_id),
            server_url: profile.server_url.clone(),
            apikey: profile.api_key.clone(),
        },
        webhook_url: params.destination_url.to_string(),
        execution_mode: "production",
    })
}

/// `host[:port]` of the destination, the way an HTTP `Host` header carries it.
fn destination_host(destination_url: &str) -> Result<String, EnvelopeError> {
    let url = Url::parse(destination_url)
        .map_err(|e| EnvelopeError::InvalidUrl(format!("{destination_url}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| EnvelopeError::InvalidUrl(format!("{destination_url}: missing host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

fn synthetic_message_id() -> String {
    format!("{:016X}", rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params<'a>(text: &'a str, url: &'a str) -> EnvelopeParams<'a> {
        EnvelopeParams {
            text,
            display_name: "ana",
            display_id: "ana",
            destination_url: url,
        }
    }

    #[test]
    fn text_is_carried_verbatim() {
        let text = "olá \"doutor\"\n<b>dor</b> & febre";
        let env = build_envelope(
            &EnvelopeProfile::default(),
            &params(text, "https://n8n.example.com/webhook/abc"),
        )
        .unwrap();

        let json = serde_json::to_string(&env).expect("serialize");
        let parsed: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["body"]["data"]["message"]["conversation"], text);
    }

    #[test]
    fn message_ids_are_fresh_and_uppercase_hex() {
        let profile = EnvelopeProfile::default();
        let p = params("oi", "http://localhost:5678/webhook");
        let a = build_envelope(&profile, &p).unwrap();
        let b = build_envelope(&profile, &p).unwrap();

        assert_ne!(a.message_id(), b.message_id());
        for id in [a.message_id(), b.message_id()] {
            assert!(!id.is_empty());
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
                "unexpected id: {id}"
            );
        }
    }

    #[test]
    fn host_keeps_explicit_port() {
        let env = build_envelope(
            &EnvelopeProfile::default(),
            &params("oi", "http://localhost:5678/webhook/chat"),
        )
        .unwrap();
        assert_eq!(env.headers.host, "localhost:5678");

        let env = build_envelope(
            &EnvelopeProfile::default(),
            &params("oi", "https://n8n.example.com/webhook"),
        )
        .unwrap();
        assert_eq!(env.headers.host, "n8n.example.com");
    }

    #[test]
    fn placeholders_are_present_not_omitted() {
        let env = build_envelope(
            &EnvelopeProfile::default(),
            &params("oi", "https://n8n.example.com/webhook"),
        )
        .unwrap();
        let v = serde_json::to_value(&env).unwrap();

        assert!(v["params"].as_object().unwrap().is_empty());
        assert!(v["query"].as_object().unwrap().is_empty());
        assert!(v["body"]["data"]["contextInfo"].is_null());
        assert!(v["body"]["data"].get("contextInfo").is_some());
        assert!(
            v["body"]["data"]["message"]["messageContextInfo"]
                .as_object()
                .unwrap()
                .is_empty()
        );
        assert_eq!(v["body"]["event"], "messages.upsert");
        assert_eq!(v["body"]["data"]["key"]["fromMe"], false);
        assert_eq!(v["executionMode"], "production");
    }

    #[test]
    fn addressing_fields_derive_from_inputs() {
        let url = "https://n8n.example.com/webhook/abc";
        let env = build_envelope(
            &EnvelopeProfile::default(),
            &EnvelopeParams {
                text: "oi",
                display_name: "Ana Souza",
                display_id: "anasouza",
                destination_url: url,
            },
        )
        .unwrap();
        let v = serde_json::to_value(&env).unwrap();

        assert_eq!(v["headers"]["host"], "n8n.example.com");
        assert_eq!(v["headers"]["user-agent"], "dr-sof-web/1.0");
        assert_eq!(v["headers"]["content-type"], "application/json");
        assert_eq!(v["webhookUrl"], url);
        assert_eq!(v["body"]["destination"], url);
        assert_eq!(v["body"]["sender"], "anasouza@s.whatsapp.net");
        assert_eq!(v["body"]["data"]["key"]["senderLid"], "anasouza@lid");
        assert_eq!(v["body"]["data"]["pushName"], "Ana Souza");
        assert_eq!(v["body"]["apikey"], "dr-sof-demo-key");
    }

    #[test]
    fn timestamps_agree() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:30:45.123Z")
            .unwrap()
            .with_timezone(&Utc);
        let env = build_envelope_at(
            &EnvelopeProfile::default(),
            &params("oi", "https://n8n.example.com/"),
            now,
        )
        .unwrap();
        assert_eq!(env.body.date_time, "2024-05-01T12:30:45.123Z");
        assert_eq!(env.body.data.message_timestamp, now.timestamp());
    }

    #[test]
    fn rejects_unparseable_destination() {
        let err = build_envelope(&EnvelopeProfile::default(), &params("oi", "not a url"))
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidUrl(_)));

        let err = build_envelope(&EnvelopeProfile::default(), &params("oi", "mailto:a@b.c"))
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidUrl(_)));
    }
}
