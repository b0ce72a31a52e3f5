//! Chat endpoints. Both run the same turn path and differ only in session
//! policy and response shape.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use garden_core::{EmotionalState, StateMeta, TransitionInsight};
use serde::{Deserialize, Serialize};

use crate::conversation::SessionPolicy;
use crate::error::ApiError;
use crate::links::{self, Link, Links};
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: String,
    pub response: Option<String>,
    pub follow_up: Option<String>,
    pub transition_insight: Option<TransitionInsight>,
    pub current_state: StateMeta,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub emotional_state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResponse {
    pub response: Option<String>,
    pub follow_up: Option<String>,
    pub transition_insight: Option<TransitionInsight>,
    pub session_updated: bool,
    #[serde(rename = "_links")]
    pub links: Links,
}

fn parse_state(label: Option<&str>) -> Result<EmotionalState, ApiError> {
    let label = label
        .filter(|l| !l.trim().is_empty())
        .ok_or(ApiError::InvalidState(None))?;
    Ok(label.parse::<EmotionalState>()?)
}

/// Handler for `POST /api/chat`. Creates a session when the id is absent or unknown.
pub async fn chat(
    State(state): State<GatewayState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|rej| ApiError::MalformedBody(rej.body_text()))?;
    let emotional_state = parse_state(req.state.as_deref())?;

    let outcome = state
        .conversation
        .take_turn(
            req.session_id.as_deref(),
            SessionPolicy::CreateIfMissing,
            emotional_state,
            req.message.as_deref().unwrap_or_default(),
        )
        .await?;

    let current_state = state
        .catalog
        .state(outcome.state)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("catalog has no metadata for {}", outcome.state))?;

    let links = links::links([
        ("self", Link::post(links::CHAT)),
        ("session", Link::get(links::session_href(&outcome.session_id))),
        ("history", Link::get(links::history_href(&outcome.session_id))),
        ("states", links::states()),
    ]);

    Ok(Json(ChatResponse {
        session_id: outcome.session_id,
        response: outcome.response,
        follow_up: outcome.follow_up,
        transition_insight: outcome.transition_insight,
        current_state,
        links,
    }))
}

/// Handler for `POST /api/response`. The session must already exist.
pub async fn respond(
    State(state): State<GatewayState>,
    payload: Result<Json<RespondRequest>, JsonRejection>,
) -> Result<Json<RespondResponse>, ApiError> {
    let Json(req) = payload.map_err(|rej| ApiError::MalformedBody(rej.body_text()))?;
    let session_id = req
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::SessionIdRequired)?;
    let emotional_state = parse_state(req.emotional_state.as_deref())?;

    let outcome = state
        .conversation
        .take_turn(
            Some(&session_id),
            SessionPolicy::RequireExisting,
            emotional_state,
            req.message.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(RespondResponse {
        response: outcome.response,
        follow_up: outcome.follow_up,
        transition_insight: outcome.transition_insight,
        session_updated: true,
        links: links::links([
            ("history", Link::get(links::history_href(&session_id))),
            ("session", Link::get(links::session_href(&session_id))),
            ("states", links::states()),
        ]),
    }))
}
