use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use garden_core::{Clock, EmotionalState, GardenError, Session, SystemClock};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Outcome of recording a turn.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    /// State reported before this turn, if any.
    pub previous: Option<EmotionalState>,
    /// Snapshot of the session after the turn.
    pub session: Session,
}

/// Abstract interface for session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Allocate a fresh session with an empty journey.
    async fn create_session(&self) -> Session;

    /// Snapshot of the session with exactly this id.
    async fn get_session(&self, id: &str) -> Option<Session>;

    /// Append a turn to an existing session.
    async fn record_turn(
        &self,
        id: &str,
        state: EmotionalState,
        message: &str,
    ) -> Result<TurnRecord, GardenError>;

    /// The session for a known id, otherwise a new one. The flag is true when created.
    async fn get_or_create(&self, id: Option<&str>) -> (Session, bool) {
        if let Some(id) = id {
            if let Some(session) = self.get_session(id).await {
                return (session, false);
            }
        }
        (self.create_session().await, true)
    }

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// Drop every session, returning how many were removed.
    async fn clear(&self) -> usize;
}

/// Process-local store. Each session has its own lock so turns against the
/// same id are serialised while other sessions proceed.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
        }
    }

    async fn entry(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self) -> Session {
        let session = Session::new(Uuid::new_v4().to_string(), self.clock.now_ms());
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), Arc::new(Mutex::new(session.clone())));
        debug!(session_id = %session.id, total = sessions.len(), "Session created");
        session
    }

    async fn get_session(&self, id: &str) -> Option<Session> {
        let entry = self.entry(id).await?;
        let session = entry.lock().await;
        Some(session.clone())
    }

    async fn record_turn(
        &self,
        id: &str,
        state: EmotionalState,
        message: &str,
    ) -> Result<TurnRecord, GardenError> {
        let entry = self
            .entry(id)
            .await
            .ok_or_else(|| GardenError::SessionNotFound(id.to_string()))?;

        let mut session = entry.lock().await;
        let previous = session.record_turn(state, message, self.clock.now_ms());
        debug!(
            session_id = %id,
            %state,
            turns = session.emotional_journey.len(),
            "Turn recorded"
        );

        Ok(TurnRecord {
            previous,
            session: session.clone(),
        })
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn clear(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.len();
        sessions.clear();
        removed
    }
}
