use serde::{Deserialize, Serialize};

use crate::types::EmotionalState;

/// Something that happened to a session, emitted to the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    pub session_id: String,
    pub timestamp: i64,
    pub kind: TurnEventKind,
}

/// Categories of session events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEventKind {
    /// A new session was allocated
    SessionCreated,
    /// A turn was appended to the journey
    TurnRecorded {
        state: EmotionalState,
        message: String,
    },
    /// The reported state changed between turns
    TransitionNarrated {
        from: EmotionalState,
        to: EmotionalState,
        /// False when the pair fell back to the generic record
        specific: bool,
    },
}

impl TurnEvent {
    pub fn new(session_id: impl Into<String>, timestamp: i64, kind: TurnEventKind) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp,
            kind,
        }
    }
}

impl std::fmt::Display for TurnEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnEventKind::SessionCreated => write!(f, "session_created"),
            TurnEventKind::TurnRecorded { state, .. } => write!(f, "turn_recorded({})", state),
            TurnEventKind::TransitionNarrated { from, to, .. } => {
                write!(f, "transition_narrated({}->{})", from, to)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(TurnEventKind::SessionCreated.to_string(), "session_created");
        let kind = TurnEventKind::TransitionNarrated {
            from: EmotionalState::Anxious,
            to: EmotionalState::Peaceful,
            specific: true,
        };
        assert_eq!(kind.to_string(), "transition_narrated(anxious->peaceful)");
    }

    #[test]
    fn test_event_kind_tagged_serialization() {
        let event = TurnEvent::new(
            "s1",
            10,
            TurnEventKind::TurnRecorded {
                state: EmotionalState::Hopeful,
                message: "hi".into(),
            },
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"]["type"], "turn_recorded");
        assert_eq!(value["kind"]["state"], "hopeful");
    }
}
