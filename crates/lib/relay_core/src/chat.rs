//! Append-only chat transcript held by a client.

use std::fmt;

/// First bot message after login.
pub const GREETING: &str = "Hello! I'm Dr Sof's virtual assistant. I'm here to help with an \
                            initial assessment of your symptoms. How are you feeling today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::User => write!(f, "user"),
            Origin::Bot => write!(f, "bot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub origin: Origin,
}

/// Messages in the order they were added. Nothing is ever edited or removed.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns it for rendering.
    pub fn push(&mut self, origin: Origin, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage {
            text: text.into(),
            origin,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(Origin::User, text)
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(Origin::Bot, text)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut log = ChatLog::new();
        log.push_bot(GREETING);
        log.push_user("dor de cabeça");
        log.push_bot("(há quanto tempo?)");

        let origins: Vec<Origin> = log.messages().iter().map(|m| m.origin).collect();
        assert_eq!(origins, vec![Origin::Bot, Origin::User, Origin::Bot]);
        assert_eq!(log.messages()[1].text, "dor de cabeça");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn push_returns_the_new_message() {
        let mut log = ChatLog::new();
        assert!(log.is_empty());
        let msg = log.push_user("oi");
        assert_eq!(msg.origin, Origin::User);
        assert_eq!(msg.text, "oi");
    }

    #[test]
    fn origin_display() {
        assert_eq!(Origin::User.to_string(), "user");
        assert_eq!(Origin::Bot.to_string(), "bot");
    }
}
