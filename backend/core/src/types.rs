use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GardenError;

/// One of the eight fixed moods a visitor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Peaceful,
    Anxious,
    Reflective,
    Overwhelmed,
    Hopeful,
    Uncertain,
    Grateful,
    Processing,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 8] = [
        EmotionalState::Peaceful,
        EmotionalState::Anxious,
        EmotionalState::Reflective,
        EmotionalState::Overwhelmed,
        EmotionalState::Hopeful,
        EmotionalState::Uncertain,
        EmotionalState::Grateful,
        EmotionalState::Processing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Peaceful => "peaceful",
            EmotionalState::Anxious => "anxious",
            EmotionalState::Reflective => "reflective",
            EmotionalState::Overwhelmed => "overwhelmed",
            EmotionalState::Hopeful => "hopeful",
            EmotionalState::Uncertain => "uncertain",
            EmotionalState::Grateful => "grateful",
            EmotionalState::Processing => "processing",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = GardenError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        EmotionalState::ALL
            .into_iter()
            .find(|state| state.as_str() == label)
            .ok_or_else(|| GardenError::UnknownState(s.to_string()))
    }
}

/// Display metadata for a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMeta {
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub particle_effect: String,
    pub color: String,
}

/// Narrative shown when a visitor moves from one state to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInsight {
    pub insight: String,
    pub prompt: String,
    pub metaphor: String,
    pub affirmation: String,
}

/// A reported state in a session's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyEntry {
    pub state: EmotionalState,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Time spent in this state. Zero on the latest entry until it is superseded.
    pub duration_ms: i64,
}

/// A message sent during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    pub text: String,
    pub emotional_state: EmotionalState,
    pub timestamp: i64,
}

/// One visitor's journey and message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: i64,
    pub emotional_journey: Vec<JourneyEntry>,
    pub messages: Vec<MessageEntry>,
}

impl Session {
    pub fn new(id: impl Into<String>, start_time: i64) -> Self {
        Self {
            id: id.into(),
            start_time,
            emotional_journey: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// The most recently reported state, if any.
    pub fn current_state(&self) -> Option<EmotionalState> {
        self.emotional_journey.last().map(|entry| entry.state)
    }

    /// Append a journey entry (and a message entry when `message` is non-empty),
    /// backfilling the previous entry's duration. Returns the state reported
    /// before this turn.
    ///
    /// Timestamps never run backwards within a journey: a clock that steps back
    /// is clamped to the previous entry's timestamp.
    pub fn record_turn(
        &mut self,
        state: EmotionalState,
        message: &str,
        now: i64,
    ) -> Option<EmotionalState> {
        let previous = self.current_state();
        let mut timestamp = now;

        if let Some(prior) = self.emotional_journey.last_mut() {
            timestamp = timestamp.max(prior.timestamp);
            prior.duration_ms = timestamp - prior.timestamp;
        }

        self.emotional_journey.push(JourneyEntry {
            state,
            timestamp,
            duration_ms: 0,
        });

        if !message.is_empty() {
            self.messages.push(MessageEntry {
                text: message.to_string(),
                emotional_state: state,
                timestamp,
            });
        }

        previous
    }

    /// The journey with the latest entry's duration filled in as of `now`.
    pub fn journey_at(&self, now: i64) -> Vec<JourneyEntry> {
        let mut journey = self.emotional_journey.clone();
        if let Some(last) = journey.last_mut() {
            last.duration_ms = (now - last.timestamp).max(0);
        }
        journey
    }

    /// Milliseconds since the session was created.
    pub fn elapsed_ms(&self, now: i64) -> i64 {
        (now - self.start_time).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parsing_is_case_insensitive() {
        assert_eq!(
            "Peaceful".parse::<EmotionalState>().unwrap(),
            EmotionalState::Peaceful
        );
        assert_eq!(
            " ANXIOUS ".parse::<EmotionalState>().unwrap(),
            EmotionalState::Anxious
        );
        assert!(matches!(
            "ecstatic".parse::<EmotionalState>(),
            Err(GardenError::UnknownState(s)) if s == "ecstatic"
        ));
    }

    #[test]
    fn test_state_wire_form_is_lowercase() {
        let json = serde_json::to_string(&EmotionalState::Overwhelmed).unwrap();
        assert_eq!(json, "\"overwhelmed\"");
        for state in EmotionalState::ALL {
            assert_eq!(state.to_string().parse::<EmotionalState>().unwrap(), state);
        }
    }

    #[test]
    fn test_record_turn_backfills_previous_duration() {
        let mut session = Session::new("s1", 1_000);
        assert_eq!(session.record_turn(EmotionalState::Peaceful, "hello", 1_500), None);
        assert_eq!(
            session.record_turn(EmotionalState::Anxious, "ugh", 4_000),
            Some(EmotionalState::Peaceful)
        );

        assert_eq!(session.emotional_journey.len(), 2);
        assert_eq!(session.emotional_journey[0].duration_ms, 2_500);
        assert_eq!(session.emotional_journey[1].duration_ms, 0);
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].emotional_state, EmotionalState::Anxious);
    }

    #[test]
    fn test_empty_message_records_journey_only() {
        let mut session = Session::new("s1", 0);
        session.record_turn(EmotionalState::Hopeful, "", 10);
        assert_eq!(session.emotional_journey.len(), 1);
        assert!(session.messages.is_empty());
    }

    #[test]
    fn test_durations_match_gaps_over_many_turns() {
        let mut session = Session::new("s1", 0);
        let times = [5, 5, 40, 41, 300, 1_000];
        for (i, t) in times.iter().enumerate() {
            let state = EmotionalState::ALL[i % EmotionalState::ALL.len()];
            session.record_turn(state, "note", *t);
        }

        assert_eq!(session.emotional_journey.len(), times.len());
        for pair in session.emotional_journey.windows(2) {
            assert!(pair[0].duration_ms >= 0);
            assert_eq!(pair[0].duration_ms, pair[1].timestamp - pair[0].timestamp);
        }
    }

    #[test]
    fn test_clock_stepping_back_is_clamped() {
        let mut session = Session::new("s1", 0);
        session.record_turn(EmotionalState::Peaceful, "", 500);
        session.record_turn(EmotionalState::Anxious, "", 200);
        assert_eq!(session.emotional_journey[0].duration_ms, 0);
        assert_eq!(session.emotional_journey[1].timestamp, 500);
    }

    #[test]
    fn test_journey_at_fills_latest_duration_lazily() {
        let mut session = Session::new("s1", 0);
        session.record_turn(EmotionalState::Peaceful, "", 100);
        session.record_turn(EmotionalState::Grateful, "", 300);

        let journey = session.journey_at(1_000);
        assert_eq!(journey[0].duration_ms, 200);
        assert_eq!(journey[1].duration_ms, 700);
        // storage is untouched
        assert_eq!(session.emotional_journey[1].duration_ms, 0);
        assert_eq!(session.elapsed_ms(1_000), 1_000);
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let mut session = Session::new("abc", 42);
        session.record_turn(EmotionalState::Reflective, "hi", 50);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["startTime"], 42);
        assert_eq!(value["emotionalJourney"][0]["state"], "reflective");
        assert_eq!(value["emotionalJourney"][0]["durationMs"], 0);
        assert_eq!(value["messages"][0]["emotionalState"], "reflective");
    }
}
