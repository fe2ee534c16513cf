//! HTTP and WebSocket request handlers.

mod http;
mod websocket;

pub use http::{
    create_interview, delete_session, execute_code, get_interview, health_check, list_sessions,
    session_detail,
};
pub use websocket::websocket_handler;
