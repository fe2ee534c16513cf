//! Session store trait: the transient persistence adapter.
//!
//! Every operation here is best-effort from the caller's point of view: the
//! synchronization engine logs and swallows store failures, and the product
//! keeps working from in-memory state alone when the store is unreachable.

use async_trait::async_trait;

use super::{ClientId, RoomId, SessionRecord, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Durable record access for sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a newly created session record.
    async fn create(&self, record: SessionRecord) -> Result<(), StoreError>;

    /// Look up a session by id.
    async fn find(&self, id: &RoomId) -> Result<Option<SessionRecord>, StoreError>;

    /// Add a connection id to the session's historical participant set.
    async fn upsert_participant(
        &self,
        id: &RoomId,
        client_id: ClientId,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Save the current code and append a bounded history snapshot.
    async fn save_code(&self, id: &RoomId, code: String, now: Timestamp)
    -> Result<(), StoreError>;

    /// Update the session's language tag.
    async fn set_language(
        &self,
        id: &RoomId,
        language: String,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Mark the session as ended (`is_active = false`, `ended_at = now`).
    async fn end_session(&self, id: &RoomId, now: Timestamp) -> Result<(), StoreError>;

    /// Most recent sessions, newest first.
    async fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, StoreError>;

    /// Delete a session record; returns `false` if it did not exist.
    async fn delete(&self, id: &RoomId) -> Result<bool, StoreError>;
}
