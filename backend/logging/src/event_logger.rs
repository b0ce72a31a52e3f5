//! Session Event Logger
//!
//! Session events (created, turn recorded, transition narrated) emitted at
//! target `garden_events`, with message text redacted first.

use garden_core::{TurnEvent, TurnEventKind};
use tracing::info;

use crate::redact::redact_sensitive_data;

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit one session event.
    pub fn log_event(event: TurnEvent) {
        let event = Self::redacted(event);
        let payload = serde_json::to_string(&event).unwrap_or_default();
        info!(
            target: "garden_events",
            session_id = %event.session_id,
            kind = %event.kind,
            event = %payload,
            "Session event"
        );
    }

    fn redacted(mut event: TurnEvent) -> TurnEvent {
        if let TurnEventKind::TurnRecorded { message, .. } = &mut event.kind {
            *message = redact_sensitive_data(message);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::EmotionalState;

    #[test]
    fn test_turn_message_is_redacted() {
        let event = TurnEvent::new(
            "s1",
            0,
            TurnEventKind::TurnRecorded {
                state: EmotionalState::Anxious,
                message: "text me on 555-123-4567".into(),
            },
        );
        let event = EventLogger::redacted(event);
        match event.kind {
            TurnEventKind::TurnRecorded { message, .. } => {
                assert_eq!(message, "text me on [REDACTED_PHONE]");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_log_event_does_not_panic_without_subscriber() {
        EventLogger::log_event(TurnEvent::new("s1", 0, TurnEventKind::SessionCreated));
    }
}
