//! Gateway Health API

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::links;
use crate::server::GatewayState;

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mindful-garden",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len().await,
        "uptimeSeconds": state.started_at.elapsed().as_secs(),
        "_links": links::links([
            ("self", links::Link::get(links::HEALTH)),
            ("docs", links::Link::get(links::DOCS)),
            ("states", links::states()),
        ]),
    }))
}
