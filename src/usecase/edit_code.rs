//! UseCase: apply a code edit and fan it out to peers.

use std::sync::Arc;
use std::time::Duration;

use crate::common::time::Clock;
use crate::domain::{
    ClientId, MessagePusher, RegistryError, RoomId, RoomRegistry, SessionStore, Timestamp,
};
use crate::infrastructure::debounce::DebounceScheduler;
use crate::infrastructure::sequencer::RoomSequencer;

/// Quiet window before an edit burst is flushed to the store.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditCodeError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

pub struct EditCodeUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
    debounce: Arc<DebounceScheduler>,
    clock: Arc<dyn Clock>,
}

impl EditCodeUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
        debounce: Arc<DebounceScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            pusher,
            sequencer,
            debounce,
            clock,
        }
    }

    /// Overwrite the room's code (last write wins) and push `update` to the
    /// peers. The editor itself is excluded: its local buffer is already
    /// ahead of what it sent.
    ///
    /// The write and the enqueue onto the peer channels happen under the
    /// room's sequencer slot, so peers always receive updates in the order
    /// the room applied them: the last update delivered carries the code the
    /// room actually holds.
    ///
    /// Persistence is debounced per room, so a typing burst produces a single
    /// store write with the final text once the burst goes quiet.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        editor: &ClientId,
        code: String,
        update: &str,
    ) -> Result<(), EditCodeError> {
        let _slot = self.sequencer.acquire(room_id).await;

        match self.registry.set_code(room_id, code.clone()).await {
            Ok(()) => {}
            Err(RegistryError::RoomNotFound(id)) => return Err(EditCodeError::RoomNotFound(id)),
        }

        let store = Arc::clone(&self.store);
        let room = room_id.clone();
        let now = Timestamp::new(self.clock.now_millis());
        self.debounce
            .schedule(room_id.clone(), async move {
                if let Err(e) = store.save_code(&room, code, now).await {
                    tracing::warn!("failed to persist code for session {}: {}", room, e);
                }
            })
            .await;

        let targets: Vec<ClientId> = self
            .registry
            .participants(room_id)
            .await
            .into_iter()
            .filter(|id| id != editor)
            .collect();
        if let Err(e) = self.pusher.broadcast(targets, update).await {
            tracing::warn!("failed to broadcast code update for {}: {}", room_id, e);
        }
        Ok(())
    }
}
