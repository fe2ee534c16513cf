//! UseCase: switch the room's editor language.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    ClientId, MessagePusher, RegistryError, RoomId, RoomRegistry, SessionStore, Timestamp,
};
use crate::infrastructure::sequencer::RoomSequencer;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChangeLanguageError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

pub struct ChangeLanguageUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
    clock: Arc<dyn Clock>,
}

impl ChangeLanguageUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            pusher,
            sequencer,
            clock,
        }
    }

    /// Change the room's language and push `update` to everyone, the sender
    /// included: language drives editor config, so even the initiator gets
    /// the authoritative confirmation.
    ///
    /// The write and the fan-out share the room's sequencer slot with code
    /// edits, so a language switch cannot interleave with an edit and leave
    /// clients seeing updates out of application order.
    ///
    /// Language changes are rare, so persistence is immediate rather than
    /// debounced, still off the broadcast path.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        language: String,
        update: &str,
    ) -> Result<(), ChangeLanguageError> {
        let _slot = self.sequencer.acquire(room_id).await;

        match self.registry.set_language(room_id, language.clone()).await {
            Ok(()) => {}
            Err(RegistryError::RoomNotFound(id)) => {
                return Err(ChangeLanguageError::RoomNotFound(id));
            }
        }

        let store = Arc::clone(&self.store);
        let room = room_id.clone();
        let now = Timestamp::new(self.clock.now_millis());
        tokio::spawn(async move {
            if let Err(e) = store.set_language(&room, language, now).await {
                tracing::warn!("failed to persist language for session {}: {}", room, e);
            }
        });

        let targets: Vec<ClientId> = self.registry.participants(room_id).await;
        if let Err(e) = self.pusher.broadcast(targets, update).await {
            tracing::warn!("failed to broadcast language update for {}: {}", room_id, e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{Room, RoomIdFactory, SessionRecord};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::repository::{InMemoryRoomRegistry, InMemorySessionStore};
    use std::time::Duration;
    use tokio::sync::mpsc;

    async fn fixture() -> (
        ChangeLanguageUseCase,
        Arc<InMemoryRoomRegistry>,
        Arc<InMemorySessionStore>,
        Arc<WebSocketMessagePusher>,
        RoomId,
    ) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let store = Arc::new(InMemorySessionStore::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let now = Timestamp::new(1_000);
        let id = RoomIdFactory::generate();
        registry
            .insert(Room::new(
                id.clone(),
                "Ada".to_string(),
                "java".to_string(),
                now,
            ))
            .await;
        store
            .create(SessionRecord::new(
                id.clone(),
                "Ada".to_string(),
                "java".to_string(),
                now,
            ))
            .await
            .unwrap();
        let usecase = ChangeLanguageUseCase::new(
            registry.clone(),
            store.clone(),
            pusher.clone(),
            Arc::new(RoomSequencer::new()),
            Arc::new(FixedClock::new(2_000)),
        );
        (usecase, registry, store, pusher, id)
    }

    #[tokio::test]
    async fn test_change_reaches_whole_room_including_sender() {
        // given: two participants, both registered with the pusher
        let (usecase, registry, _store, pusher, room_id) = fixture().await;
        let alice = ClientId::new("alice").unwrap();
        let bob = ClientId::new("bob").unwrap();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        registry
            .add_participant(&room_id, alice.clone())
            .await
            .unwrap();
        registry
            .add_participant(&room_id, bob.clone())
            .await
            .unwrap();
        pusher.register_client(alice.clone(), alice_tx).await;
        pusher.register_client(bob.clone(), bob_tx).await;

        // when:
        usecase
            .execute(&room_id, "go".to_string(), "lang-update")
            .await
            .unwrap();

        // then: both participants received it, the room switched
        assert_eq!(alice_rx.try_recv().unwrap(), "lang-update");
        assert_eq!(bob_rx.try_recv().unwrap(), "lang-update");
        assert_eq!(registry.get(&room_id).await.unwrap().language, "go");
    }

    #[tokio::test]
    async fn test_change_persists_to_store() {
        // given:
        let (usecase, _registry, store, _pusher, room_id) = fixture().await;

        // when:
        usecase
            .execute(&room_id, "cpp".to_string(), "lang-update")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // then:
        let record = store.find(&room_id).await.unwrap().unwrap();
        assert_eq!(record.language, "cpp");
    }

    #[tokio::test]
    async fn test_change_unknown_room_fails() {
        // given:
        let (usecase, _registry, _store, _pusher, _room_id) = fixture().await;

        // when:
        let result = usecase
            .execute(&RoomId::new("nope"), "go".to_string(), "lang-update")
            .await;

        // then:
        assert_eq!(
            result,
            Err(ChangeLanguageError::RoomNotFound("nope".to_string()))
        );
    }
}
