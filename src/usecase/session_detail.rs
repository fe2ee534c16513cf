//! UseCase: full session record including bounded code history.

use std::sync::Arc;

use crate::domain::{RoomId, SessionRecord, SessionStore};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GetSessionDetailError {
    #[error("session not found: {0}")]
    NotFound(String),
}

pub struct GetSessionDetailUseCase {
    store: Arc<dyn SessionStore>,
}

impl GetSessionDetailUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The detail view always reads the persisted record: history and the
    /// participant roster only exist there.
    pub async fn execute(&self, id: &RoomId) -> Result<SessionRecord, GetSessionDetailError> {
        match self.store.find(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(GetSessionDetailError::NotFound(id.to_string())),
            Err(e) => {
                tracing::warn!("session detail lookup failed for {}: {}", id, e);
                Err(GetSessionDetailError::NotFound(id.to_string()))
            }
        }
    }
}
