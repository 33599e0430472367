//! Client configuration endpoint.

use axum::Json;
use axum::extract::State;
use relay_core::models::ConfigResponse;

use crate::AppState;

/// `GET /api/config` — reports whether a default webhook is configured.
///
/// The URL itself is only included when `expose_webhook_url` is set.
pub async fn config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    let configured = state.config.resolve_webhook_url(None);
    let webhook_url = match configured {
        Some(url) if state.config.expose_webhook_url => url.to_string(),
        _ => String::new(),
    };
    Json(ConfigResponse {
        webhook_url,
        configured: configured.is_some(),
    })
}
