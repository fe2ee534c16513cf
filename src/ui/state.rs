//! Server state shared across handlers.

use std::sync::Arc;

use crate::runner::CodeRunner;
use crate::usecase::{
    ChangeLanguageUseCase, CreateSessionUseCase, DeleteSessionUseCase, DisconnectUseCase,
    EditCodeUseCase, GetRecentSessionsUseCase, GetSessionDetailUseCase, GetSessionUseCase,
    JoinRoomUseCase,
};

/// Shared application state
pub struct AppState {
    pub create_session_usecase: Arc<CreateSessionUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub edit_code_usecase: Arc<EditCodeUseCase>,
    pub change_language_usecase: Arc<ChangeLanguageUseCase>,
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    pub get_session_usecase: Arc<GetSessionUseCase>,
    pub recent_sessions_usecase: Arc<GetRecentSessionsUseCase>,
    pub session_detail_usecase: Arc<GetSessionDetailUseCase>,
    pub delete_session_usecase: Arc<DeleteSessionUseCase>,
    pub runner: Arc<CodeRunner>,
    /// Frontend origin used to build shareable interview URLs.
    pub base_url: String,
}
