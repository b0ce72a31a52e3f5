//! Response bodies computed from stored sessions.

use garden_catalog::Catalog;
use garden_core::{EmotionalState, Session};
use serde::Serialize;

use crate::links::{self, Link, Links};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyView {
    pub state: EmotionalState,
    pub timestamp: i64,
    pub duration_ms: i64,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub text: String,
    pub emotional_state: EmotionalState,
    pub timestamp: i64,
    pub context: String,
}

/// `GET /api/history/:id` body. Durations are computed as of `now`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub session_id: String,
    pub start_time: i64,
    pub duration: i64,
    pub emotional_journey: Vec<JourneyView>,
    pub messages: Vec<MessageView>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl HistoryView {
    pub fn build(session: &Session, catalog: &Catalog, now: i64) -> Self {
        let describe = |state: EmotionalState| {
            catalog
                .state(state)
                .map(|meta| meta.description.clone())
                .unwrap_or_default()
        };

        let emotional_journey = session
            .journey_at(now)
            .into_iter()
            .map(|entry| JourneyView {
                state: entry.state,
                timestamp: entry.timestamp,
                duration_ms: entry.duration_ms,
                description: describe(entry.state),
            })
            .collect();

        let messages = session
            .messages
            .iter()
            .map(|msg| MessageView {
                text: msg.text.clone(),
                emotional_state: msg.emotional_state,
                timestamp: msg.timestamp,
                context: describe(msg.emotional_state),
            })
            .collect();

        Self {
            session_id: session.id.clone(),
            start_time: session.start_time,
            duration: session.elapsed_ms(now),
            emotional_journey,
            messages,
            links: links::links([
                ("self", Link::get(links::history_href(&session.id))),
                ("session", Link::get(links::session_href(&session.id))),
                ("states", links::states()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_of_fresh_session() {
        let catalog = Catalog::embedded().unwrap();
        let session = Session::new("fresh", 1_000);
        let view = HistoryView::build(&session, &catalog, 4_500);
        assert!(view.emotional_journey.is_empty());
        assert!(view.messages.is_empty());
        assert_eq!(view.duration, 3_500);
    }

    #[test]
    fn test_history_fills_descriptions_and_latest_duration() {
        let catalog = Catalog::embedded().unwrap();
        let mut session = Session::new("s", 0);
        session.record_turn(EmotionalState::Anxious, "Feeling anxious today", 100);
        session.record_turn(EmotionalState::Reflective, "", 600);

        let view = HistoryView::build(&session, &catalog, 1_000);
        assert_eq!(view.emotional_journey[0].duration_ms, 500);
        assert_eq!(view.emotional_journey[1].duration_ms, 400);
        assert_eq!(
            view.emotional_journey[0].description,
            "Like ripples on water's surface, feelings of unease or worry"
        );
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.messages[0].context, view.emotional_journey[0].description);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sessionId"], "s");
        assert_eq!(json["emotionalJourney"][1]["durationMs"], 400);
        assert_eq!(json["_links"]["self"]["href"], "/api/history/s");
    }
}
