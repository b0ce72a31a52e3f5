//! Main HTTP Gateway Server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use garden_catalog::Catalog;
use garden_core::{Clock, RandomSource};
use garden_sessions::SessionStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::conversation::Conversation;
use crate::{chat_api, docs_api, health_api, session_api, states_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<dyn SessionStore>,
    pub conversation: Arc<Conversation>,
    pub clock: Arc<dyn Clock>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let conversation = Arc::new(Conversation::new(
            catalog.clone(),
            sessions.clone(),
            random,
            clock.clone(),
        ));
        Self {
            catalog,
            sessions,
            conversation,
            clock,
            started_at: Instant::now(),
        }
    }
}

/// Build the router with every API route, CORS and request tracing.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/health", get(health_api::get_health))
        .route("/api/docs", get(docs_api::get_docs))
        .route("/api/docs/ui", get(docs_api::get_docs_ui))
        .route("/api/states", get(states_api::list_states))
        .route("/api/session/create", post(session_api::create_session))
        .route("/api/session/:id", get(session_api::get_session))
        .route("/api/history/:id", get(session_api::get_history))
        .route("/api/chat", post(chat_api::chat))
        .route("/api/response", post(chat_api::respond))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` resolves, then tear down the session store.
#[instrument(skip(state, shutdown))]
pub async fn start_server<F>(addr: SocketAddr, state: GatewayState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let sessions = state.sessions.clone();
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    let dropped = sessions.clear().await;
    info!(dropped, "Session store torn down");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
    }
    info!("Shutdown signal received");
}
