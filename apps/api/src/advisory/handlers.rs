//! Axum route handlers for the Advisory API.
//!
//! One generic handler serves all six domains; the router instantiates it per
//! request type. The caller's `aiEnabled` flag picks the path:
//! off → placeholder (client never called), on → `advise`.

use axum::{extract::State, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::advisory::{advise, AdvisoryDomain};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Request body: the domain's fields plus the caller's AI flag.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryCall<R> {
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(flatten)]
    pub request: R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Ai,
    Placeholder,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse<T> {
    pub source: ResultSource,
    pub result: T,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/advisory/{profile|document|research|visa|cultural|career}
pub async fn handle_advise<R>(
    State(state): State<AppState>,
    Json(call): Json<AdvisoryCall<R>>,
) -> Result<Json<AdvisoryResponse<R::Output>>, AppError>
where
    R: AdvisoryDomain + DeserializeOwned + 'static,
{
    call.request.validate().map_err(AppError::Validation)?;

    if !call.ai_enabled {
        let domain = R::DOMAIN;
        debug!(%domain, "AI disabled, serving placeholder");
        return Ok(Json(AdvisoryResponse {
            source: ResultSource::Placeholder,
            result: call.request.placeholder(),
        }));
    }

    let result = advise(state.llm.as_ref(), &call.request).await?;

    Ok(Json(AdvisoryResponse {
        source: ResultSource::Ai,
        result,
    }))
}
