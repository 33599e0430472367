//! API server configuration.

use std::path::PathBuf;

use relay_core::envelope::EnvelopeProfile;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// Webhook used when a request does not name one.
    pub default_webhook_url: Option<String>,
    /// Whether `GET /api/config` reveals the default webhook URL.
    pub expose_webhook_url: bool,
    /// Directory holding the browser client.
    pub static_dir: PathBuf,
    /// Platform identity stamped on outbound envelopes.
    pub envelope: EnvelopeProfile,
}

impl ApiConfig {
    /// Picks the request's webhook, falling back to the configured default.
    /// Empty strings count as absent.
    pub fn resolve_webhook_url<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested
            .filter(|u| !u.trim().is_empty())
            .or(self.default_webhook_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}
