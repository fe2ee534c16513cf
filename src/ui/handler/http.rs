//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{
        CreateInterviewRequest, CreateInterviewResponse, ExecuteRequest, ExecuteResponse,
        InterviewDto, SessionDetailDto, SessionListDto, SessionSummaryDto,
    },
    ui::state::AppState,
    usecase::{
        DEFAULT_SESSION_LIST_LIMIT, DeleteSessionError, GetSessionDetailError, GetSessionError,
        SessionView,
    },
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Run a snippet and return its output. Execution failures are reported in
/// the output text with status 200; only an empty snippet is a client error.
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExecuteRequest>,
) -> (StatusCode, Json<ExecuteResponse>) {
    if request.code.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ExecuteResponse {
                output: "Error: No code provided".to_string(),
            }),
        );
    }

    let output = state.runner.execute(&request.language, &request.code).await;
    (StatusCode::OK, Json(ExecuteResponse { output }))
}

/// Create a new interview session and return its shareable URL.
pub async fn create_interview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateInterviewRequest>,
) -> Json<CreateInterviewResponse> {
    let id = state
        .create_session_usecase
        .execute(request.candidate_name, request.language)
        .await;

    let url = format!("{}/interview/{}", state.base_url, id);
    Json(CreateInterviewResponse {
        id: id.to_string(),
        url,
    })
}

/// Get an interview session, live room first.
pub async fn get_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InterviewDto>, (StatusCode, Json<serde_json::Value>)> {
    match state.get_session_usecase.execute(&RoomId::new(id)).await {
        Ok(SessionView::Live(room)) => Ok(Json(InterviewDto::from_live_room(&room))),
        Ok(SessionView::Persisted(record)) => Ok(Json(InterviewDto::from_record(&record))),
        Err(GetSessionError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Room not found"})),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// List recent sessions, newest first.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<SessionListDto> {
    let limit = query.limit.unwrap_or(DEFAULT_SESSION_LIST_LIMIT);
    let records = state.recent_sessions_usecase.execute(limit).await;

    let sessions: Vec<SessionSummaryDto> = records.iter().map(SessionSummaryDto::from).collect();
    Json(SessionListDto { sessions })
}

/// Full session record including code history.
pub async fn session_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetailDto>, (StatusCode, Json<serde_json::Value>)> {
    match state.session_detail_usecase.execute(&RoomId::new(id)).await {
        Ok(record) => Ok(Json(SessionDetailDto::from(&record))),
        Err(GetSessionDetailError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )),
    }
}

/// Delete a session record and its live room, if any.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.delete_session_usecase.execute(&RoomId::new(id)).await {
        Ok(()) => Ok(Json(
            serde_json::json!({"message": "Session deleted successfully"}),
        )),
        Err(DeleteSessionError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        )),
        Err(DeleteSessionError::StoreUnavailable) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Failed to delete session"})),
        )),
    }
}
