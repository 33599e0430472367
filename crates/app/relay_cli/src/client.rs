//! HTTP client for the relay API.

use relay_core::models::{ConfigResponse, SendMessageRequest};
use reqwest::StatusCode;
use serde_json::Value;

use crate::Result;

/// What the relay said about a message.
#[derive(Debug)]
pub enum SendOutcome {
    /// Any reply to render as a bot message, success or failure.
    Reply(Value),
    /// The request was refused before reaching the webhook.
    Rejected(String),
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/config`. Failures are swallowed and reported as `None`.
    pub async fn fetch_config(&self) -> Option<ConfigResponse> {
        let result = match self.http.get(self.url("/api/config")).send().await {
            Ok(resp) => resp.json::<ConfigResponse>().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(config) => Some(config),
            Err(e) => {
                log::debug!("config fetch failed: {e}");
                None
            }
        }
    }

    /// `POST /api/sendMessage`. Only transport failures are errors.
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<SendOutcome> {
        let resp = self
            .http
            .post(self.url("/api/sendMessage"))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await?;

        if status == StatusCode::BAD_REQUEST
            && let Some(error) = body.get("error").and_then(Value::as_str)
        {
            return Ok(SendOutcome::Rejected(error.to_string()));
        }
        Ok(SendOutcome::Reply(body))
    }
}
