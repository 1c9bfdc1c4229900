//! Student advisory API: six AI advisory domains and a chat relay, built on one
//! generative-service client.

pub mod advisory;
pub mod chat;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod routes;
pub mod state;
