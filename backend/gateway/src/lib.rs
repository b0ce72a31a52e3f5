//! Mindful Garden HTTP gateway.
//!
//! Serves the state table, session lifecycle, history and chat endpoints
//! over axum, plus health and OpenAPI docs.

pub mod chat_api;
pub mod conversation;
pub mod docs_api;
pub mod error;
pub mod health_api;
pub mod links;
pub mod server;
pub mod session_api;
pub mod states_api;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use conversation::{Conversation, SessionPolicy, TurnOutcome};
pub use error::ApiError;
pub use server::{GatewayState, build_router, shutdown_signal, start_server};
