pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisory::handlers::handle_advise;
use crate::advisory::models::{
    CareerRequest, CulturalRequest, DocumentRequest, ProfileRequest, ResearchRequest, VisaRequest,
};
use crate::chat::handlers::handle_chat;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Advisory API
        .route(
            "/api/v1/advisory/profile",
            post(handle_advise::<ProfileRequest>),
        )
        .route(
            "/api/v1/advisory/document",
            post(handle_advise::<DocumentRequest>),
        )
        .route(
            "/api/v1/advisory/research",
            post(handle_advise::<ResearchRequest>),
        )
        .route("/api/v1/advisory/visa", post(handle_advise::<VisaRequest>))
        .route(
            "/api/v1/advisory/cultural",
            post(handle_advise::<CulturalRequest>),
        )
        .route(
            "/api/v1/advisory/career",
            post(handle_advise::<CareerRequest>),
        )
        // Chat relay
        .route("/api/chat", post(handle_chat))
        .with_state(state)
}
