//! Conversation loop shared by `chat` and `send`.

use relay_core::chat::{ChatLog, ChatMessage, GREETING, Origin};
use relay_core::dispatch::{Dispatch, DispatchEvent};
use relay_core::models::SendMessageRequest;
use relay_core::reply::display_reply;
use relay_core::session::Session;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::client::{ApiClient, SendOutcome};
use crate::{Error, Result};

pub const NOT_CONFIGURED: &str = "Webhook is not configured on the server (.env).";

/// Logs in against the server's configuration.
///
/// Fails when neither the user nor the server supplies a webhook.
pub async fn login(client: &ApiClient, email: &str, webhook_url: Option<String>) -> Result<Session> {
    let config = client.fetch_config().await.unwrap_or_default();
    let webhook_url = webhook_url
        .filter(|u| !u.trim().is_empty())
        .or(Some(config.webhook_url));
    let session = Session::from_email(email, webhook_url);

    if session.webhook_url.is_none() && !config.configured {
        return Err(Error::Custom(NOT_CONFIGURED.into()));
    }
    log::info!("signed in as {} ({})", session.display_name, session.display_id);
    Ok(session)
}

pub struct Conversation<'a> {
    client: &'a ApiClient,
    session: Session,
    log: ChatLog,
}

impl<'a> Conversation<'a> {
    pub fn new(client: &'a ApiClient, session: Session) -> Self {
        Self {
            client,
            session,
            log: ChatLog::new(),
        }
    }

    pub fn greet(&mut self) -> &ChatMessage {
        self.log.push_bot(GREETING)
    }

    /// Sends one line and records both sides.
    ///
    /// Returns the bot's message, or `None` for blank input. A refused
    /// request is an error; an unreachable relay becomes a bot message.
    pub async fn exchange(&mut self, text: &str) -> Result<Option<&ChatMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.log.push_user(text);

        let request = SendMessageRequest {
            message: Some(text.to_string()),
            webhook_url: self.session.webhook_url.clone(),
            medico_nome: Some(self.session.display_name.clone()),
            medico_id: Some(self.session.display_id.clone()),
        };

        let mut dispatch = Dispatch::new();
        dispatch
            .apply(DispatchEvent::Send)
            .map_err(|e| Error::Custom(e.to_string()))?;

        let reply = match self.client.send_message(&request).await {
            Ok(SendOutcome::Reply(body)) => {
                dispatch
                    .apply(DispatchEvent::Response)
                    .map_err(|e| Error::Custom(e.to_string()))?;
                display_reply(&body)
            }
            Ok(SendOutcome::Rejected(error)) => {
                dispatch
                    .apply(DispatchEvent::Response)
                    .map_err(|e| Error::Custom(e.to_string()))?;
                return Err(Error::Custom(error));
            }
            Err(e) => {
                dispatch
                    .apply(DispatchEvent::TransportError)
                    .map_err(|e| Error::Custom(e.to_string()))?;
                log::debug!("relay unreachable: {e}");
                format!("Error contacting the webhook: {e}")
            }
        };
        log::debug!("dispatch {}", dispatch.state());

        Ok(Some(self.log.push_bot(reply)))
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }
}

/// Renders one transcript line.
pub fn render(message: &ChatMessage) -> String {
    match message.origin {
        Origin::User => format!("you> {}", message.text),
        Origin::Bot => format!("bot> {}", message.text),
    }
}

/// Reads stdin line by line until EOF.
pub async fn run_interactive(conversation: &mut Conversation<'_>) -> Result<()> {
    let mut out = tokio::io::stdout();
    let greeting = render(conversation.greet());
    write_line(&mut out, &greeting).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match conversation.exchange(&line).await {
            Ok(Some(reply)) => {
                let rendered = render(reply);
                write_line(&mut out, &rendered).await?;
            }
            Ok(None) => {}
            // Refusals are shown and the loop goes on, like the browser alert.
            Err(Error::Custom(msg)) => log::error!("{msg}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn write_line(out: &mut (impl AsyncWrite + Unpin), line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prefixes_origin() {
        let user = ChatMessage {
            text: "oi".into(),
            origin: Origin::User,
        };
        let bot = ChatMessage {
            text: "(olá)".into(),
            origin: Origin::Bot,
        };
        assert_eq!(render(&user), "you> oi");
        assert_eq!(render(&bot), "bot> (olá)");
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let session = Session::from_email("ana@x.com", Some("http://hook".into()));
        let mut conversation = Conversation::new(&client, session);
        assert!(conversation.exchange("   ").await.unwrap().is_none());
        assert!(conversation.log().is_empty());
    }
}
