//! Room registry trait: the single source of truth for live rooms.

use async_trait::async_trait;

use super::{ClientId, Room, RoomId};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

/// Process-wide mapping from room id to live room state.
///
/// All mutation is funneled through these methods so concurrent edits to the
/// same room never interleave into a corrupted document. The usecase layer
/// depends on this trait; the infrastructure layer provides the in-memory
/// implementation (dependency inversion).
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Insert a freshly created room.
    async fn insert(&self, room: Room);

    /// Fetch a copy of the room's current state.
    async fn get(&self, id: &RoomId) -> Option<Room>;

    /// Remove a room, returning its final state if it existed.
    async fn remove(&self, id: &RoomId) -> Option<Room>;

    /// Attach a connection to a room; returns the new participant count.
    async fn add_participant(&self, id: &RoomId, client_id: ClientId)
    -> Result<usize, RegistryError>;

    /// Detach a connection from a room; returns the remaining count.
    async fn remove_participant(
        &self,
        id: &RoomId,
        client_id: &ClientId,
    ) -> Result<usize, RegistryError>;

    /// Overwrite the room's document (last-writer-wins).
    async fn set_code(&self, id: &RoomId, code: String) -> Result<(), RegistryError>;

    /// Overwrite the room's language tag.
    async fn set_language(&self, id: &RoomId, language: String) -> Result<(), RegistryError>;

    /// Connections currently attached to the room (empty if the room is absent).
    async fn participants(&self, id: &RoomId) -> Vec<ClientId>;

    /// Live participant count, or `None` if the room is absent.
    async fn participant_count(&self, id: &RoomId) -> Option<usize>;
}
