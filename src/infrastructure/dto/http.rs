//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// `POST /api/execute` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
}

/// `POST /api/execute` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub output: String,
}

/// `POST /api/interviews` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub candidate_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// `POST /api/interviews` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInterviewResponse {
    pub id: String,
    /// Shareable URL built from the configured base address.
    pub url: String,
}

/// `GET /api/interviews/{id}` response body.
///
/// Served from the live room when one exists; otherwise from the persisted
/// record, in which case `user_count` is 0 because the stored participant
/// list is historical, not a live count.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDto {
    pub id: String,
    pub candidate_name: String,
    pub language: String,
    pub code: String,
    pub user_count: usize,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

/// One entry of `GET /api/sessions`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    pub id: String,
    pub candidate_name: String,
    pub language: String,
    pub is_active: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    pub participant_count: usize,
}

/// `GET /api/sessions` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListDto {
    pub sessions: Vec<SessionSummaryDto>,
}

/// One bounded-history entry in the session detail view.
#[derive(Debug, Serialize, Deserialize)]
pub struct CodeSnapshotDto {
    pub timestamp: String,
    pub code: String,
}

/// `GET /api/sessions/{id}/details` response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailDto {
    pub id: String,
    pub candidate_name: String,
    pub language: String,
    pub code: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    pub participants: Vec<String>,
    pub code_history: Vec<CodeSnapshotDto>,
}
