//! UseCase: detach a connection and tear the room down once it stays empty.

use std::sync::Arc;
use std::time::Duration;

use crate::common::time::Clock;
use crate::domain::{
    ClientId, MessagePusher, RegistryError, RoomId, RoomRegistry, SessionStore, Timestamp,
};
use crate::infrastructure::sequencer::RoomSequencer;

/// How long an empty room survives before teardown. A page refresh
/// reconnects well within this window and finds the room intact.
pub const TEARDOWN_GRACE: Duration = Duration::from_secs(60);

pub struct DisconnectUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RoomSequencer>,
    clock: Arc<dyn Clock>,
    grace: Duration,
}

impl DisconnectUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_grace_period(registry, store, pusher, sequencer, clock, TEARDOWN_GRACE)
    }

    pub fn with_grace_period(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RoomSequencer>,
        clock: Arc<dyn Clock>,
        grace: Duration,
    ) -> Self {
        Self {
            registry,
            store,
            pusher,
            sequencer,
            clock,
            grace,
        }
    }

    /// Detach the connection from its room and return the remaining
    /// participants to notify.
    ///
    /// Leaving the room empty arms a deferred teardown that re-checks the
    /// count after the grace period: a rejoin in the meantime disarms it.
    pub async fn execute(&self, room_id: &RoomId, client_id: &ClientId) -> Vec<ClientId> {
        self.pusher.unregister_client(client_id).await;

        let remaining = match self.registry.remove_participant(room_id, client_id).await {
            Ok(count) => count,
            Err(RegistryError::RoomNotFound(_)) => {
                // Already torn down; nothing to notify.
                return Vec::new();
            }
        };

        if remaining == 0 {
            self.schedule_teardown(room_id.clone());
            return Vec::new();
        }

        self.registry.participants(room_id).await
    }

    /// Notify remaining participants that someone left.
    pub async fn broadcast_user_left(
        &self,
        targets: Vec<ClientId>,
        message: &str,
    ) -> Result<(), String> {
        self.pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    fn schedule_teardown(&self, room_id: RoomId) {
        let registry = Arc::clone(&self.registry);
        let store = Arc::clone(&self.store);
        let sequencer = Arc::clone(&self.sequencer);
        let clock = Arc::clone(&self.clock);
        let grace = self.grace;

        tokio::spawn(async move {
            tokio::time::sleep(grace).await;

            // The room may have been rejoined, or deleted through the API.
            match registry.participant_count(&room_id).await {
                Some(0) => {}
                _ => return,
            }

            registry.remove(&room_id).await;
            sequencer.remove(&room_id).await;
            let now = Timestamp::new(clock.now_millis());
            if let Err(e) = store.end_session(&room_id, now).await {
                tracing::warn!("failed to end session {}: {}", room_id, e);
            }
            tracing::info!("session {} torn down after grace period", room_id);
        });
    }
}
