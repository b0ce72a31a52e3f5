//! The single turn path shared by `/api/chat` and `/api/response`.
//!
//! Looks up (or creates) the session, records the turn under the session's
//! lock, narrates the change from the previous state, and picks the canned
//! response and follow-up.

use std::sync::Arc;

use garden_catalog::Catalog;
use garden_core::{
    Clock, EmotionalState, GardenError, RandomSource, Session, TransitionInsight, TurnEvent,
    TurnEventKind,
};
use garden_logging::EventLogger;
use garden_narrator::{Narrator, ResponseSelector};
use garden_sessions::SessionStore;

/// What to do when the caller's session id is absent or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPolicy {
    /// Start a new session (chat).
    CreateIfMissing,
    /// Reject with `SessionNotFound` (response).
    RequireExisting,
}

/// Everything a turn produces.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    /// True when this turn started a new session.
    pub created: bool,
    pub state: EmotionalState,
    pub response: Option<String>,
    pub follow_up: Option<String>,
    pub transition_insight: Option<TransitionInsight>,
    pub journey_len: usize,
}

pub struct Conversation {
    sessions: Arc<dyn SessionStore>,
    narrator: Narrator,
    responder: ResponseSelector,
    clock: Arc<dyn Clock>,
}

impl Conversation {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            narrator: Narrator::new(catalog.clone()),
            responder: ResponseSelector::new(catalog, random),
            clock,
        }
    }

    /// Explicitly start a session.
    pub async fn start_session(&self) -> Session {
        let session = self.sessions.create_session().await;
        self.emit(&session.id, TurnEventKind::SessionCreated);
        session
    }

    /// Record one turn and build its reply.
    pub async fn take_turn(
        &self,
        session_id: Option<&str>,
        policy: SessionPolicy,
        state: EmotionalState,
        message: &str,
    ) -> Result<TurnOutcome, GardenError> {
        let (session_id, created) = match policy {
            SessionPolicy::CreateIfMissing => {
                let (session, created) = self.sessions.get_or_create(session_id).await;
                if created {
                    self.emit(&session.id, TurnEventKind::SessionCreated);
                }
                (session.id, created)
            }
            SessionPolicy::RequireExisting => {
                let id = session_id.ok_or(GardenError::MissingField("sessionId"))?;
                (id.to_string(), false)
            }
        };

        let record = self
            .sessions
            .record_turn(&session_id, state, message)
            .await?;
        self.emit(
            &session_id,
            TurnEventKind::TurnRecorded {
                state,
                message: message.to_string(),
            },
        );

        let transition_insight = match self.narrator.narrate(record.previous, state) {
            Some(narration) => {
                if let Some(from) = record.previous {
                    self.emit(
                        &session_id,
                        TurnEventKind::TransitionNarrated {
                            from,
                            to: state,
                            specific: narration.is_specific(),
                        },
                    );
                }
                Some(narration.insight().clone())
            }
            None => None,
        };

        Ok(TurnOutcome {
            session_id,
            created,
            state,
            response: self.responder.pick_response(state).map(str::to_string),
            follow_up: self.responder.follow_up(state).map(str::to_string),
            transition_insight,
            journey_len: record.session.emotional_journey.len(),
        })
    }

    fn emit(&self, session_id: &str, kind: TurnEventKind) {
        EventLogger::log_event(TurnEvent::new(session_id, self.clock.now_ms(), kind));
    }
}
