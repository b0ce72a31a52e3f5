use thiserror::Error;

/// Top-level error type for the Mindful Garden service.
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("unknown emotional state: {0}")]
    UnknownState(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
