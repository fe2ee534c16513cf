//! UseCase: start a new interview session.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    Room, RoomId, RoomIdFactory, RoomRegistry, SessionRecord, SessionStore, Timestamp,
};

/// Language preselected in the editor when the creator does not pick one.
pub const DEFAULT_EDITOR_LANGUAGE: &str = "javascript";

pub struct CreateSessionUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl CreateSessionUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            clock,
        }
    }

    /// Create a live room and its persisted record.
    ///
    /// Persistence is best-effort: if the store write fails the room still
    /// exists in memory and the session is fully usable.
    pub async fn execute(&self, candidate_name: String, language: Option<String>) -> RoomId {
        let language = language.unwrap_or_else(|| DEFAULT_EDITOR_LANGUAGE.to_string());
        let id = RoomIdFactory::generate();
        let now = Timestamp::new(self.clock.now_millis());

        let room = Room::new(id.clone(), candidate_name.clone(), language.clone(), now);
        self.registry.insert(room).await;

        let record = SessionRecord::new(id.clone(), candidate_name, language, now);
        if let Err(e) = self.store.create(record).await {
            tracing::warn!("failed to persist new session {}: {}", id, e);
        }

        tracing::info!("session {} created", id);
        id
    }
}
