//! Shared fixtures for gateway tests.

use std::sync::Arc;

use garden_catalog::Catalog;
use garden_core::{ManualClock, SeededRandom};
use garden_sessions::{InMemorySessionStore, SessionStore};

use crate::conversation::Conversation;
use crate::server::GatewayState;

pub(crate) struct TestHarness {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<dyn SessionStore>,
    pub clock: Arc<ManualClock>,
    pub conversation: Arc<Conversation>,
}

impl TestHarness {
    pub fn new() -> Self {
        let catalog = Arc::new(Catalog::embedded().expect("embedded catalog"));
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(clock.clone()));
        let conversation = Arc::new(Conversation::new(
            catalog.clone(),
            sessions.clone(),
            Arc::new(SeededRandom::new(11)),
            clock.clone(),
        ));
        Self {
            catalog,
            sessions,
            clock,
            conversation,
        }
    }

    pub fn state(&self) -> GatewayState {
        GatewayState {
            catalog: self.catalog.clone(),
            sessions: self.sessions.clone(),
            conversation: self.conversation.clone(),
            clock: self.clock.clone(),
            started_at: std::time::Instant::now(),
        }
    }
}
