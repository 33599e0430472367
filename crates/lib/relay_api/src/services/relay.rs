//! Webhook relay — one outbound call per chat message.
//!
//! Builds the envelope, POSTs it to the webhook exactly once, and normalizes
//! whatever comes back. Any HTTP status counts as an answer; only transport
//! failures are errors.

use relay_core::dispatch::{Dispatch, DispatchEvent, TransitionError};
use relay_core::envelope::{EnvelopeError, EnvelopeParams, EnvelopeProfile, build_envelope};
use relay_core::normalize::{NormalizedResponse, normalize_response, parse_body};
use reqwest::Client;
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Relay errors.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error("Webhook request failed: {0}")]
    Transport(String),

    #[error("Failed to read webhook response: {0}")]
    Body(String),

    #[error(transparent)]
    Dispatch(#[from] TransitionError),
}

/// What the webhook said, reduced to something displayable.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    /// HTTP status of the webhook's answer.
    pub status: u16,
    pub normalized: NormalizedResponse,
}

/// Forwards one message to the webhook at `params.destination_url`.
pub async fn relay_message(
    client: &Client,
    profile: &EnvelopeProfile,
    params: &EnvelopeParams<'_>,
) -> Result<RelayOutcome, RelayError> {
    let envelope = build_envelope(profile, params)?;
    let request_id = Uuid::new_v4();

    let mut dispatch = Dispatch::new();
    dispatch.apply(DispatchEvent::Send)?;
    debug!(
        %request_id,
        message_id = envelope.message_id(),
        host = %envelope.headers.host,
        state = %dispatch.state(),
        "forwarding message to webhook"
    );

    let sent = client
        .post(params.destination_url)
        .header(ACCEPT, "application/json")
        .json(&envelope)
        .send()
        .await;

    let response = match sent {
        Ok(response) => {
            dispatch.apply(DispatchEvent::Response)?;
            response
        }
        Err(e) => {
            dispatch.apply(DispatchEvent::TransportError)?;
            warn!(%request_id, error = %e, "webhook unreachable");
            return Err(RelayError::Transport(e.to_string()));
        }
    };

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| RelayError::Body(e.to_string()))?;

    let normalized = normalize_response(&parse_body(&text));
    info!(
        %request_id,
        status,
        reply_len = normalized.message.len(),
        "webhook answered"
    );

    Ok(RelayOutcome { status, normalized })
}
