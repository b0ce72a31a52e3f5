//! `GET /api/states`

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::links::{self, Link};
use crate::server::GatewayState;

/// The full state metadata table.
pub async fn list_states(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "states": state.catalog.states(),
        "_links": links::links([
            ("self", links::states()),
            ("chat", links::chat()),
            ("history", Link::get(links::HISTORY)),
        ]),
    }))
}
