//! In-memory room registry.
//!
//! A single async mutex over the room map serializes all mutation, which is
//! what gives per-room edits their ordering guarantee: two simultaneous
//! edits to the same room can race for the lock but never interleave inside
//! a document update.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, RegistryError, Room, RoomId, RoomRegistry};

/// Live room map; the single source of truth for "is this session live".
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn insert(&self, room: Room) {
        let mut rooms = self.rooms.lock().await;
        rooms.insert(room.id.clone(), room);
    }

    async fn get(&self, id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(id).cloned()
    }

    async fn remove(&self, id: &RoomId) -> Option<Room> {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(id)
    }

    async fn add_participant(
        &self,
        id: &RoomId,
        client_id: ClientId,
    ) -> Result<usize, RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| RegistryError::RoomNotFound(id.to_string()))?;
        room.add_participant(client_id);
        Ok(room.participant_count())
    }

    async fn remove_participant(
        &self,
        id: &RoomId,
        client_id: &ClientId,
    ) -> Result<usize, RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| RegistryError::RoomNotFound(id.to_string()))?;
        room.remove_participant(client_id);
        Ok(room.participant_count())
    }

    async fn set_code(&self, id: &RoomId, code: String) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| RegistryError::RoomNotFound(id.to_string()))?;
        room.set_code(code);
        Ok(())
    }

    async fn set_language(&self, id: &RoomId, language: String) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| RegistryError::RoomNotFound(id.to_string()))?;
        room.set_language(language);
        Ok(())
    }

    async fn participants(&self, id: &RoomId) -> Vec<ClientId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(id)
            .map(|room| room.participants.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn participant_count(&self, id: &RoomId) -> Option<usize> {
        let rooms = self.rooms.lock().await;
        rooms.get(id).map(|room| room.participant_count())
    }
}
