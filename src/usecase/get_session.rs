//! UseCase: look up a single session, live room first.

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRegistry, SessionRecord, SessionStore};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GetSessionError {
    #[error("session not found: {0}")]
    NotFound(String),
}

/// Where the session data came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    /// The room is live; code and count are authoritative.
    Live(Room),
    /// The room is gone; only the persisted record remains.
    Persisted(SessionRecord),
}

pub struct GetSessionUseCase {
    registry: Arc<dyn RoomRegistry>,
    store: Arc<dyn SessionStore>,
}

impl GetSessionUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, store: Arc<dyn SessionStore>) -> Self {
        Self { registry, store }
    }

    /// Prefer the live room; fall back to the persisted record. A store
    /// failure on the fallback path reads as not-found rather than an error,
    /// since the store is best-effort.
    pub async fn execute(&self, id: &RoomId) -> Result<SessionView, GetSessionError> {
        if let Some(room) = self.registry.get(id).await {
            return Ok(SessionView::Live(room));
        }

        match self.store.find(id).await {
            Ok(Some(record)) => Ok(SessionView::Persisted(record)),
            Ok(None) => Err(GetSessionError::NotFound(id.to_string())),
            Err(e) => {
                tracing::warn!("session store lookup failed for {}: {}", id, e);
                Err(GetSessionError::NotFound(id.to_string()))
            }
        }
    }
}
