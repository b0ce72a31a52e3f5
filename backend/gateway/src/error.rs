use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use garden_core::GardenError;
use serde::Serialize;

use crate::links::{self, Link, Links};

/// Errors surfaced to HTTP callers as `{error, _links}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found")]
    SessionNotFound(String),
    #[error("Session ID is required")]
    SessionIdRequired,
    #[error("Valid emotional state is required")]
    InvalidState(Option<String>),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Something went wrong!")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "_links")]
    links: Links,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SessionIdRequired
            | ApiError::InvalidState(_)
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn links(&self) -> Links {
        match self {
            ApiError::SessionNotFound(_) => links::links([
                ("create", links::create_session()),
                ("states", links::states()),
            ]),
            ApiError::SessionIdRequired => links::links([("create", links::create_session())]),
            ApiError::InvalidState(_) => links::links([("states", links::states())]),
            ApiError::MalformedBody(_) => {
                links::links([("states", links::states()), ("chat", links::chat())])
            }
            ApiError::Internal(_) => links::links([
                ("states", links::states()),
                ("chat", links::chat()),
                ("history", Link::get(links::HISTORY)),
            ]),
        }
    }
}

impl From<GardenError> for ApiError {
    fn from(err: GardenError) -> Self {
        match err {
            GardenError::SessionNotFound(id) => ApiError::SessionNotFound(id),
            GardenError::UnknownState(label) => ApiError::InvalidState(Some(label)),
            GardenError::MissingField("sessionId") => ApiError::SessionIdRequired,
            GardenError::MissingField(_) => ApiError::InvalidState(None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => tracing::error!("internal error: {:?}", e),
            ApiError::SessionNotFound(id) => tracing::debug!(session_id = %id, "Session not found"),
            ApiError::InvalidState(Some(label)) => {
                tracing::debug!(label = %label, "Rejected unknown emotional state")
            }
            _ => tracing::debug!(error = %self, "Rejected request"),
        }

        let body = ErrorBody {
            error: self.to_string(),
            links: self.links(),
        };
        (self.status(), Json(body)).into_response()
    }
}
