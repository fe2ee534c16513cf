//! UseCase: list recent sessions, newest first.

use std::sync::Arc;

use crate::domain::{SessionRecord, SessionStore};

pub const DEFAULT_SESSION_LIST_LIMIT: usize = 20;

pub struct GetRecentSessionsUseCase {
    store: Arc<dyn SessionStore>,
}

impl GetRecentSessionsUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A store failure yields an empty list: the dashboard degrades to
    /// "nothing yet" instead of erroring.
    pub async fn execute(&self, limit: usize) -> Vec<SessionRecord> {
        match self.store.recent_sessions(limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("failed to list recent sessions: {}", e);
                Vec::new()
            }
        }
    }
}
