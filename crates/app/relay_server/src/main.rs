//! Web chat relay server binary.
//!
//! Serves the browser chat client and relays its messages to the configured
//! workflow webhook.

use std::path::{Path, PathBuf};

use clap::Parser;
use relay_core::envelope::EnvelopeProfile;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Web chat relay server", version)]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Webhook used when a chat request does not name one.
    #[arg(long, env = "N8N_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Whether `GET /api/config` reveals the default webhook URL to clients.
    #[arg(
        long,
        env = "EXPOSE_WEBHOOK_URL",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    expose_webhook_url: bool,

    /// Directory holding the browser client. Defaults to `public` next to
    /// the executable, else `public` under the working directory.
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Instance name stamped on outbound envelopes.
    #[arg(long, env = "ENVELOPE_INSTANCE")]
    envelope_instance: Option<String>,

    /// API key stamped on outbound envelopes.
    #[arg(long, env = "ENVELOPE_API_KEY")]
    envelope_api_key: Option<String>,
}

impl Args {
    fn envelope_profile(&self) -> EnvelopeProfile {
        let mut profile = EnvelopeProfile::default();
        if let Some(instance) = non_empty(self.envelope_instance.as_deref()) {
            profile.instance = instance.to_string();
        }
        if let Some(api_key) = non_empty(self.envelope_api_key.as_deref()) {
            profile.api_key = api_key.to_string();
        }
        profile
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// An explicit directory wins; otherwise `public` beside the executable if it
/// exists, else `public` relative to the working directory.
fn resolve_static_dir(explicit: Option<PathBuf>, exe_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    exe_dir
        .map(|d| d.join("public"))
        .filter(|d| d.is_dir())
        .unwrap_or_else(|| PathBuf::from("public"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_api=debug,relay_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let config = relay_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        default_webhook_url: non_empty(args.webhook_url.as_deref()).map(String::from),
        expose_webhook_url: args.expose_webhook_url,
        static_dir: resolve_static_dir(args.static_dir.clone(), exe_dir.as_deref()),
        envelope: args.envelope_profile(),
    };

    info!(
        version = relay_core::version(),
        bind_addr = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        expose_webhook_url = config.expose_webhook_url,
        "starting relay_server"
    );
    if config.default_webhook_url.is_none() {
        warn!("no default webhook configured; clients must send webhookUrl");
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = relay_api::router(relay_api::AppState::new(config));

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
            }
            shutdown.cancel();
        }
    });

    info!(addr = %local_addr, "relay listening on http://{local_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
