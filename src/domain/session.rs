//! Persisted session record: the slow, durable projection of a room.

use super::{ClientId, RoomId, Timestamp};

/// Maximum number of code snapshots kept per session. Oldest entries are
/// dropped first; this is a bounded audit trail, not a full edit log.
pub const CODE_HISTORY_LIMIT: usize = 50;

/// One entry of the bounded code history.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSnapshot {
    pub timestamp: Timestamp,
    pub code: String,
}

/// Durable record of a session; may outlive the process and the room.
///
/// `participants` is an append-only historical set of every connection ever
/// seen, not a live count. `ended_at` is set exactly once, when `is_active`
/// transitions to false.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub session_id: RoomId,
    pub candidate_name: String,
    pub language: String,
    pub code: String,
    pub participants: Vec<ClientId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub code_history: Vec<CodeSnapshot>,
}

impl SessionRecord {
    pub fn new(
        session_id: RoomId,
        candidate_name: String,
        language: String,
        now: Timestamp,
    ) -> Self {
        Self {
            session_id,
            candidate_name,
            language,
            code: String::new(),
            participants: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
            ended_at: None,
            code_history: Vec::new(),
        }
    }

    /// Record the current code and append a history snapshot, trimming the
    /// history to the most recent [`CODE_HISTORY_LIMIT`] entries.
    pub fn record_code(&mut self, code: String, now: Timestamp) {
        self.code = code.clone();
        self.code_history.push(CodeSnapshot {
            timestamp: now,
            code,
        });
        let excess = self.code_history.len().saturating_sub(CODE_HISTORY_LIMIT);
        if excess > 0 {
            self.code_history.drain(..excess);
        }
        self.updated_at = now;
    }

    /// Add a connection id to the historical participant set (deduplicated).
    pub fn add_participant(&mut self, client_id: ClientId, now: Timestamp) {
        if !self.participants.contains(&client_id) {
            self.participants.push(client_id);
            self.updated_at = now;
        }
    }

    pub fn set_language(&mut self, language: String, now: Timestamp) {
        self.language = language;
        self.updated_at = now;
    }

    /// Mark the session as ended. `ended_at` is only written on the first
    /// call; later calls are no-ops.
    pub fn end(&mut self, now: Timestamp) {
        if self.is_active {
            self.is_active = false;
            self.ended_at = Some(now);
            self.updated_at = now;
        }
    }
}
