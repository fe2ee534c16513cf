//! UseCase: attach a connection to a room.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    ClientId, MessagePusher, PusherChannel, RegistryError, RoomId, RoomRegistry, SessionStore,
    Timestamp,
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum JoinRoomError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

/// State snapshot sent to the joining client.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub language: String,
    pub code: String,
    pub user_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub snapshot: RoomSnapshot,
    /// Peers to notify with the presence update (the joiner excluded).
    pub notify_targets: Vec<ClientId>,
}

pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
    pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        store: Arc<dyn SessionStore>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            pusher,
            clock,
        }
    }

    /// Attach `client_id` to the room and register its sender channel.
    ///
    /// An unknown room mutates nothing and is reported to the caller only.
    /// The store-side participant upsert is fire-and-forget.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let user_count = match self
            .registry
            .add_participant(room_id, client_id.clone())
            .await
        {
            Ok(count) => count,
            Err(RegistryError::RoomNotFound(id)) => return Err(JoinRoomError::RoomNotFound(id)),
        };

        self.pusher.register_client(client_id.clone(), sender).await;

        // Best-effort historical participant tracking; never blocks the
        // real-time path.
        {
            let store = Arc::clone(&self.store);
            let room = room_id.clone();
            let client = client_id.clone();
            let now = Timestamp::new(self.clock.now_millis());
            tokio::spawn(async move {
                if let Err(e) = store.upsert_participant(&room, client, now).await {
                    tracing::warn!("failed to record participant for session {}: {}", room, e);
                }
            });
        }

        let Some(room) = self.registry.get(room_id).await else {
            // Room vanished between the add and the snapshot read.
            self.pusher.unregister_client(&client_id).await;
            return Err(JoinRoomError::RoomNotFound(room_id.to_string()));
        };

        let notify_targets = room
            .participants
            .iter()
            .filter(|id| **id != client_id)
            .cloned()
            .collect();

        Ok(JoinOutcome {
            snapshot: RoomSnapshot {
                language: room.language,
                code: room.code,
                user_count,
            },
            notify_targets,
        })
    }

    /// Notify existing participants that someone joined.
    pub async fn broadcast_user_joined(
        &self,
        targets: Vec<ClientId>,
        message: &str,
    ) -> Result<(), String> {
        self.pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }
}
