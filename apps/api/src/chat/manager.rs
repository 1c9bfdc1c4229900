//! Chat Session Manager. Owns one `ChatSession` and drives its turn state machine.
//!
//! Idle --send--> AwaitingReply --reply | failure--> Idle
//!
//! `send` appends the user message and raises `reply_pending` in one atomic step,
//! then resolves the turn on a spawned task. Every failure (transport, malformed
//! reply, timeout) becomes the same fallback message; the transcript never shows
//! error internals. State changes are published on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::chat::{ChatMessage, ChatSession, ChatTransport};
use crate::llm_client::{LlmError, DEFAULT_TIMEOUT_SECS};

/// Shown in place of a reply whenever a turn fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble responding right now. Please try again in a moment.";

/// Why `send` refused a message. A refused send leaves the transcript untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("a reply is still pending")]
    ReplyPending,

    #[error("message is empty")]
    EmptyMessage,
}

pub struct ChatSessionManager {
    state: Arc<watch::Sender<ChatSession>>,
    transport: Arc<dyn ChatTransport>,
    reply_timeout: Duration,
}

impl ChatSessionManager {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self::with_timeout(transport, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(transport: Arc<dyn ChatTransport>, reply_timeout: Duration) -> Self {
        let (state, _) = watch::channel(ChatSession::default());
        Self {
            state: Arc::new(state),
            transport,
            reply_timeout,
        }
    }

    /// Starts a turn. Returns once the user message is in the transcript;
    /// the reply arrives later through `subscribe`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&self, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let mut accepted = false;
        self.state.send_if_modified(|session| {
            if session.reply_pending {
                return false;
            }
            session.append(ChatMessage::user(text));
            session.reply_pending = true;
            accepted = true;
            true
        });

        if !accepted {
            debug!("send rejected: reply pending");
            return Err(ChatError::ReplyPending);
        }

        let state = Arc::clone(&self.state);
        let transport = Arc::clone(&self.transport);
        let reply_timeout = self.reply_timeout;
        let message = text.to_string();

        tokio::spawn(async move {
            // The transport runs on its own task so a panic inside it still ends the turn.
            let call = tokio::spawn(async move {
                tokio::time::timeout(reply_timeout, transport.reply(&message)).await
            });

            let outcome = match call.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(_)) => Err(LlmError::Transport {
                    status: None,
                    message: format!("no reply within {}s", reply_timeout.as_secs_f32()),
                }),
                Err(e) => Err(LlmError::Transport {
                    status: None,
                    message: format!("reply task aborted: {e}"),
                }),
            };

            let reply = match outcome {
                Ok(text) => ChatMessage::assistant(text),
                Err(e) => {
                    warn!(stage = e.stage(), error = %e, "chat turn failed, using fallback reply");
                    ChatMessage::assistant(FALLBACK_REPLY)
                }
            };

            state.send_modify(|session| {
                session.append(reply);
                session.reply_pending = false;
            });
        });

        Ok(())
    }

    /// Receiver that wakes on every transcript change.
    pub fn subscribe(&self) -> watch::Receiver<ChatSession> {
        self.state.subscribe()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state.borrow().messages().to_vec()
    }

    pub fn is_reply_pending(&self) -> bool {
        self.state.borrow().is_reply_pending()
    }
}
