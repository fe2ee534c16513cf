//! Live room state: the in-memory, authoritative projection of a session.

use std::collections::HashSet;

use super::{ClientId, RoomId, Timestamp};

/// One live interview room.
///
/// Exists in the registry while at least one participant is connected or the
/// room is within its teardown grace period. The participant set is the only
/// source of truth for occupancy; the persisted [`super::SessionRecord`] is a
/// lagging projection and never wins while the room is live.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub candidate_name: String,
    /// Editor language tag (free-form; execution support is a separate,
    /// narrower enumeration in the runner).
    pub language: String,
    /// Full document text, last-writer-wins.
    pub code: String,
    /// Connections currently attached to this room.
    pub participants: HashSet<ClientId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(
        id: RoomId,
        candidate_name: String,
        language: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            candidate_name,
            language,
            code: String::new(),
            participants: HashSet::new(),
            created_at,
        }
    }

    /// Attach a connection. Returns `false` if it was already attached.
    pub fn add_participant(&mut self, client_id: ClientId) -> bool {
        self.participants.insert(client_id)
    }

    /// Detach a connection. Returns `false` if it was not attached.
    pub fn remove_participant(&mut self, client_id: &ClientId) -> bool {
        self.participants.remove(client_id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Overwrite the shared document. Concurrent edits from two clients can
    /// clobber each other; there is deliberately no merge strategy.
    pub fn set_code(&mut self, code: String) {
        self.code = code;
    }

    pub fn set_language(&mut self, language: String) {
        self.language = language;
    }
}
