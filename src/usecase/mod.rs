//! Application usecases: one operation per module.
//!
//! Each usecase holds `Arc<dyn Trait>` dependencies on the domain seams and
//! exposes `execute` plus, where fan-out is needed, a `broadcast_*` method
//! taking the already-serialized message (DTO serialization stays in the UI
//! layer). Room-scoped updates (code, language) fold the broadcast into
//! `execute` instead, so the mutation and the fan-out share the room's
//! sequencer slot.

mod change_language;
mod create_session;
mod delete_session;
mod disconnect;
mod edit_code;
mod get_session;
mod join_room;
mod recent_sessions;
mod session_detail;

pub use change_language::{ChangeLanguageError, ChangeLanguageUseCase};
pub use create_session::{CreateSessionUseCase, DEFAULT_EDITOR_LANGUAGE};
pub use delete_session::{DeleteSessionError, DeleteSessionUseCase};
pub use disconnect::{DisconnectUseCase, TEARDOWN_GRACE};
pub use edit_code::{EditCodeError, EditCodeUseCase, PERSIST_DEBOUNCE};
pub use get_session::{GetSessionError, GetSessionUseCase, SessionView};
pub use join_room::{JoinOutcome, JoinRoomError, JoinRoomUseCase, RoomSnapshot};
pub use recent_sessions::{DEFAULT_SESSION_LIST_LIMIT, GetRecentSessionsUseCase};
pub use session_detail::{GetSessionDetailError, GetSessionDetailUseCase};
