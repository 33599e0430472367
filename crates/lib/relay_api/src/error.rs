//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::envelope::EnvelopeError;
use relay_core::models::{ErrorResponse, FailureResponse};
use thiserror::Error;

use crate::services::relay::RelayError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Client mistakes answer `{ "error": ... }`; everything else answers
/// `{ "ok": false, "error": ... }` with the underlying error text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
            }
            AppError::PayloadTooLarge(error) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorResponse { error })).into_response()
            }
            AppError::Upstream(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse { ok: false, error }),
            )
                .into_response(),
        }
    }
}

impl From<EnvelopeError> for AppError {
    fn from(e: EnvelopeError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Envelope(e) => AppError::from(e),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
