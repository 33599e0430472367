//! # relay_api
//!
//! HTTP API library for the web chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{config as config_handlers, health, send_message};

/// Largest accepted JSON request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Outbound HTTP client (connection pool shared across requests).
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Unmatched paths are served from the static directory; anything not found
/// there gets `index.html` so the browser client can route itself.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = &state.config.static_dir;
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::GET_API_CONFIG, get(config_handlers::config_handler))
        .route(
            routes::POST_API_SEND_MESSAGE,
            post(send_message::send_message_handler),
        )
        .fallback_service(spa)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
