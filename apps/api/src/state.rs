use std::sync::Arc;

use crate::llm_client::GenerativeClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only path to the generative service. `GeminiClient` in production.
    pub llm: Arc<dyn GenerativeClient>,
}
