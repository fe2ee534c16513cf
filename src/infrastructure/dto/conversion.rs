//! Domain model to DTO conversions.

use crate::common::time::timestamp_to_rfc3339;
use crate::domain::{Room, SessionRecord};

use super::http::{CodeSnapshotDto, InterviewDto, SessionDetailDto, SessionSummaryDto};

impl InterviewDto {
    /// Snapshot of a live room: authoritative code/language and live count.
    pub fn from_live_room(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            candidate_name: room.candidate_name.clone(),
            language: room.language.clone(),
            code: room.code.clone(),
            user_count: room.participant_count(),
            is_active: true,
            created_at: Some(timestamp_to_rfc3339(room.created_at.value())),
            ended_at: None,
        }
    }

    /// Fallback view of a persisted record after the room is gone.
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            id: record.session_id.to_string(),
            candidate_name: record.candidate_name.clone(),
            language: record.language.clone(),
            code: record.code.clone(),
            user_count: 0,
            is_active: record.is_active,
            created_at: Some(timestamp_to_rfc3339(record.created_at.value())),
            ended_at: record
                .ended_at
                .map(|ended| timestamp_to_rfc3339(ended.value())),
        }
    }
}

impl From<&SessionRecord> for SessionSummaryDto {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.session_id.to_string(),
            candidate_name: record.candidate_name.clone(),
            language: record.language.clone(),
            is_active: record.is_active,
            created_at: timestamp_to_rfc3339(record.created_at.value()),
            ended_at: record
                .ended_at
                .map(|ended| timestamp_to_rfc3339(ended.value())),
            participant_count: record.participants.len(),
        }
    }
}

impl From<&SessionRecord> for SessionDetailDto {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.session_id.to_string(),
            candidate_name: record.candidate_name.clone(),
            language: record.language.clone(),
            code: record.code.clone(),
            is_active: record.is_active,
            created_at: timestamp_to_rfc3339(record.created_at.value()),
            updated_at: timestamp_to_rfc3339(record.updated_at.value()),
            ended_at: record
                .ended_at
                .map(|ended| timestamp_to_rfc3339(ended.value())),
            participants: record
                .participants
                .iter()
                .map(|id| id.to_string())
                .collect(),
            code_history: record
                .code_history
                .iter()
                .map(|snapshot| CodeSnapshotDto {
                    timestamp: timestamp_to_rfc3339(snapshot.timestamp.value()),
                    code: snapshot.code.clone(),
                })
                .collect(),
        }
    }
}
