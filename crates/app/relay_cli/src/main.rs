// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};

mod chat;
mod cli;
mod client;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();
    let client = client::ApiClient::new(&args.server);

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Chat(login) => {
            let session = chat::login(&client, &login.email, login.webhook_url).await?;
            let mut conversation = chat::Conversation::new(&client, session);
            chat::run_interactive(&mut conversation).await?;
            log::info!("chat closed after {} messages", conversation.log().len());
        }
        Commands::Send { login, message } => {
            let session = chat::login(&client, &login.email, login.webhook_url).await?;
            let mut conversation = chat::Conversation::new(&client, session);
            if let Some(reply) = conversation.exchange(&message).await? {
                println!("{}", reply.text);
            }
            log::debug!("transcript has {} messages", conversation.log().len());
        }
    }

    Ok(())
}
