//! UseCase: remove a session record (and its live room, if any).

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, SessionStore};
use crate::infrastructure::sequencer::RoomSequencer;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeleteSessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("session store unavailable")]
    StoreUnavailable,
}

pub struct DeleteSessionUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    sequencer: Arc<RoomSequencer>,
}

impl DeleteSessionUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        sequencer: Arc<RoomSequencer>,
    ) -> Self {
        Self {
            registry,
            store,
            sequencer,
        }
    }

    /// Deleting an in-progress session evicts the live room too. Connected
    /// clients keep their sockets but the room is gone; their next room
    /// operation reports room-not-found.
    pub async fn execute(&self, id: &RoomId) -> Result<(), DeleteSessionError> {
        let room_existed = self.registry.remove(id).await.is_some();
        self.sequencer.remove(id).await;

        let record_existed = match self.store.delete(id).await {
            Ok(existed) => existed,
            Err(e) => {
                tracing::warn!("failed to delete session {}: {}", id, e);
                return Err(DeleteSessionError::StoreUnavailable);
            }
        };

        if room_existed || record_existed {
            tracing::info!("session {} deleted", id);
            Ok(())
        } else {
            Err(DeleteSessionError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Room, SessionRecord, Timestamp};
    use crate::infrastructure::repository::{InMemoryRoomRegistry, InMemorySessionStore};

    #[tokio::test]
    async fn test_delete_removes_record_and_live_room() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let store = Arc::new(InMemorySessionStore::new());
        let id = RoomId::new("abc123def");
        registry
            .insert(Room::new(
                id.clone(),
                "Ada".to_string(),
                "go".to_string(),
                Timestamp::new(1_000),
            ))
            .await;
        store
            .create(SessionRecord::new(
                id.clone(),
                "Ada".to_string(),
                "go".to_string(),
                Timestamp::new(1_000),
            ))
            .await
            .unwrap();
        let usecase = DeleteSessionUseCase::new(
            registry.clone(),
            store.clone(),
            Arc::new(RoomSequencer::new()),
        );

        // when:
        usecase.execute(&id).await.unwrap();

        // then:
        assert!(registry.get(&id).await.is_none());
        assert!(store.find(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_session_is_not_found() {
        // given:
        let usecase = DeleteSessionUseCase::new(
            Arc::new(InMemoryRoomRegistry::new()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(RoomSequencer::new()),
        );

        // when:
        let result = usecase.execute(&RoomId::new("nope")).await;

        // then:
        assert_eq!(
            result,
            Err(DeleteSessionError::NotFound("nope".to_string()))
        );
    }
}
