//! Transport between the Chat Session Manager and the relay endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{transport_error, LlmError};

/// Body of both the relay request and its reply: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayMessage {
    pub message: String,
}

/// One user message in, one assistant reply out.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, LlmError>;
}

/// Posts to the relay endpoint (`POST /api/chat` on this service).
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ChatTransport for RelayClient {
    async fn reply(&self, message: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayMessage {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Transport {
                status: Some(status.as_u16()),
                message: format!("relay returned {status}"),
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        let reply: RelayMessage = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedEnvelope(format!("unexpected relay body: {e}")))?;

        if reply.message.trim().is_empty() {
            return Err(LlmError::MalformedContent("relay reply was empty".to_string()));
        }

        debug!(reply_chars = reply.message.len(), "relay replied");
        Ok(reply.message)
    }
}
