//! Chat relay endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use relay_core::envelope::{DEFAULT_DISPLAY_ID, DEFAULT_DISPLAY_NAME, EnvelopeParams};
use relay_core::models::{SendMessageRequest, SendMessageResponse};
use tracing::{debug, error};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::relay;

pub const MESSAGE_REQUIRED: &str = "message is required";
pub const WEBHOOK_NOT_CONFIGURED: &str = "webhookUrl is not configured";

/// `POST /api/sendMessage` — forward a chat message to the webhook and
/// return its normalized reply.
///
/// A body that is not valid JSON is treated like an empty request.
pub async fn send_message_handler(
    State(state): State<AppState>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> AppResult<Json<SendMessageResponse>> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge(rejection.body_text()));
        }
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "unreadable sendMessage body");
            SendMessageRequest::default()
        }
    };

    let message = body
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation(MESSAGE_REQUIRED.into()))?;
    let webhook_url = state
        .config
        .resolve_webhook_url(body.webhook_url.as_deref())
        .ok_or_else(|| AppError::Validation(WEBHOOK_NOT_CONFIGURED.into()))?;

    let params = EnvelopeParams {
        text: message,
        display_name: non_empty_or(body.medico_nome.as_deref(), DEFAULT_DISPLAY_NAME),
        display_id: non_empty_or(body.medico_id.as_deref(), DEFAULT_DISPLAY_ID),
        destination_url: webhook_url,
    };

    let outcome = relay::relay_message(&state.client, &state.config.envelope, &params)
        .await
        .map_err(|e| {
            error!(error = %e, "sendMessage failed");
            AppError::from(e)
        })?;

    Ok(Json(SendMessageResponse {
        ok: true,
        response_status: outcome.status,
        message: outcome.normalized.message,
        data: outcome.normalized.data,
    }))
}

fn non_empty_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_fields_use_defaults() {
        assert_eq!(non_empty_or(None, DEFAULT_DISPLAY_NAME), "Médico");
        assert_eq!(non_empty_or(Some(""), DEFAULT_DISPLAY_ID), "doctor-uid-001");
        assert_eq!(non_empty_or(Some("ana"), DEFAULT_DISPLAY_NAME), "ana");
    }
}
