//! In-memory session store.
//!
//! Stores the domain model directly in a map, the same compromise the
//! registry makes. A DBMS-backed implementation would add a row/DTO
//! conversion layer behind the same [`SessionStore`] trait; nothing above
//! the trait cares which one is wired in.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, RoomId, SessionRecord, SessionStore, StoreError, Timestamp};

pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<RoomId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, record: SessionRecord) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(record.session_id.clone(), record);
        Ok(())
    }

    async fn find(&self, id: &RoomId) -> Result<Option<SessionRecord>, StoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(id).cloned())
    }

    async fn upsert_participant(
        &self,
        id: &RoomId,
        client_id: ClientId,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let record = sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        record.add_participant(client_id, now);
        Ok(())
    }

    async fn save_code(
        &self,
        id: &RoomId,
        code: String,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let record = sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        record.record_code(code, now);
        Ok(())
    }

    async fn set_language(
        &self,
        id: &RoomId,
        language: String,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let record = sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        record.set_language(language, now);
        Ok(())
    }

    async fn end_session(&self, id: &RoomId, now: Timestamp) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;
        let record = sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        record.end(now);
        Ok(())
    }

    async fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, StoreError> {
        let sessions = self.sessions.lock().await;
        let mut records: Vec<SessionRecord> = sessions.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn delete(&self, id: &RoomId) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CODE_HISTORY_LIMIT, RoomIdFactory};

    async fn seeded_store(created_at: i64) -> (InMemorySessionStore, RoomId) {
        let store = InMemorySessionStore::new();
        let id = RoomIdFactory::generate();
        let record = SessionRecord::new(
            id.clone(),
            "Ada".to_string(),
            "javascript".to_string(),
            Timestamp::new(created_at),
        );
        store.create(record).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        // given:
        let (store, id) = seeded_store(1_000).await;

        // when:
        let found = store.find(&id).await.unwrap();

        // then:
        let record = found.expect("record should exist");
        assert_eq!(record.session_id, id);
        assert!(record.is_active);
        assert!(record.code_history.is_empty());
    }

    #[tokio::test]
    async fn test_find_unknown_session_returns_none() {
        // given:
        let store = InMemorySessionStore::new();

        // when / then:
        assert!(store.find(&RoomId::new("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_code_appends_capped_history() {
        // given:
        let (store, id) = seeded_store(1_000).await;

        // when: more writes than the history cap
        for i in 0..(CODE_HISTORY_LIMIT + 5) {
            store
                .save_code(&id, format!("v{i}"), Timestamp::new(2_000 + i as i64))
                .await
                .unwrap();
        }

        // then:
        let record = store.find(&id).await.unwrap().unwrap();
        assert_eq!(record.code, format!("v{}", CODE_HISTORY_LIMIT + 4));
        assert_eq!(record.code_history.len(), CODE_HISTORY_LIMIT);
        assert_eq!(record.code_history[0].code, "v5");
    }

    #[tokio::test]
    async fn test_save_code_for_unknown_session_fails() {
        // given:
        let store = InMemorySessionStore::new();

        // when:
        let result = store
            .save_code(&RoomId::new("ghost"), "x".to_string(), Timestamp::new(0))
            .await;

        // then:
        assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_upsert_participant_deduplicates() {
        // given:
        let (store, id) = seeded_store(1_000).await;
        let alice = ClientId::new("alice").unwrap();

        // when:
        store
            .upsert_participant(&id, alice.clone(), Timestamp::new(2_000))
            .await
            .unwrap();
        store
            .upsert_participant(&id, alice.clone(), Timestamp::new(3_000))
            .await
            .unwrap();

        // then:
        let record = store.find(&id).await.unwrap().unwrap();
        assert_eq!(record.participants, vec![alice]);
    }

    #[tokio::test]
    async fn test_end_session_marks_inactive_once() {
        // given:
        let (store, id) = seeded_store(1_000).await;

        // when:
        store.end_session(&id, Timestamp::new(5_000)).await.unwrap();
        store.end_session(&id, Timestamp::new(9_000)).await.unwrap();

        // then:
        let record = store.find(&id).await.unwrap().unwrap();
        assert!(!record.is_active);
        assert_eq!(record.ended_at, Some(Timestamp::new(5_000)));
    }

    #[tokio::test]
    async fn test_recent_sessions_newest_first_with_limit() {
        // given:
        let store = InMemorySessionStore::new();
        for (name, created_at) in [("a", 1_000), ("b", 3_000), ("c", 2_000)] {
            let record = SessionRecord::new(
                RoomIdFactory::generate(),
                name.to_string(),
                "javascript".to_string(),
                Timestamp::new(created_at),
            );
            store.create(record).await.unwrap();
        }

        // when:
        let records = store.recent_sessions(2).await.unwrap();

        // then:
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].candidate_name, "b");
        assert_eq!(records[1].candidate_name, "c");
    }

    #[tokio::test]
    async fn test_delete_session() {
        // given:
        let (store, id) = seeded_store(1_000).await;

        // when / then:
        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.find(&id).await.unwrap().is_none());
    }
}
