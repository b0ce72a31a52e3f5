//! Session lifecycle and history endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::links::{self, Link};
use crate::server::GatewayState;
use crate::views::HistoryView;

/// Handler for `POST /api/session/create`.
pub async fn create_session(State(state): State<GatewayState>) -> Json<Value> {
    let session = state.conversation.start_session().await;
    info!(session_id = %session.id, "Session created via API");

    Json(json!({
        "sessionId": session.id,
        "_links": links::links([
            ("self", Link::get(links::session_href(&session.id))),
            ("states", links::states()),
            ("chat", links::chat()),
        ]),
    }))
}

/// Handler for `GET /api/session/:id`. Returns the stored record as-is.
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let session = state
        .sessions
        .get_session(&session_id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(session_id.clone()))?;

    Ok(Json(json!({
        "_links": links::links([
            ("self", Link::get(links::session_href(&session.id))),
            ("states", links::states()),
            ("chat", links::chat()),
        ]),
        "session": session,
    })))
}

/// Handler for `GET /api/history/:id`.
pub async fn get_history(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryView>, ApiError> {
    let session = state
        .sessions
        .get_session(&session_id)
        .await
        .ok_or(ApiError::SessionNotFound(session_id))?;

    let now = state.clock.now_ms();
    Ok(Json(HistoryView::build(&session, &state.catalog, now)))
}
