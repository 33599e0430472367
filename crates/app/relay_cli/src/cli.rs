use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "relay_cli", about = "Terminal chat client for the web chat relay")]
pub struct Cli {
    /// Base URL of the relay server.
    #[arg(long, global = true, env = "RELAY_SERVER_URL", default_value = "http://localhost:3000")]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Chat interactively, one message per line of input.
    Chat(Login),

    /// Send a single message and print the reply.
    Send {
        #[command(flatten)]
        login: Login,

        /// Message text.
        message: String,
    },
}

/// Cosmetic login. The email is never verified.
#[derive(Args, Debug)]
pub struct Login {
    /// Email the display name is derived from.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Webhook to use instead of the server's default.
    #[arg(long)]
    pub webhook_url: Option<String>,
}
