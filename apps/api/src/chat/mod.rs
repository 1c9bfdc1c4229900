// Chat assistant: an append-only conversation with one outstanding turn at a time.
// The session state lives with the surface that renders it; `ChatSessionManager`
// is the only mutator. The relay endpoint in `handlers` is what `RelayClient` talks to.

pub mod handlers;
pub mod manager;
pub mod prompts;
pub mod relay;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use manager::{ChatError, ChatSessionManager, FALLBACK_REPLY};
pub use relay::{ChatTransport, RelayClient, RelayMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content.into(), Sender::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content.into(), Sender::Assistant)
    }

    fn new(content: String, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered transcript plus the reply-pending flag.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    reply_pending: bool,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_reply_pending(&self) -> bool {
        self.reply_pending
    }

    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}
