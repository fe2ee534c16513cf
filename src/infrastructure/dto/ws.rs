//! WebSocket event DTOs.

use serde::{Deserialize, Serialize};

/// Events a client may send, multiplexed by room id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Attach this connection to a room.
    Join { room_id: String, user_name: String },
    /// Replace the shared document (last-writer-wins).
    CodeChange { room_id: String, code: String },
    /// Change the room's language tag.
    LanguageChange { room_id: String, language: String },
}

/// Discriminator for server-to-client messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    RoomState,
    CodeUpdate,
    LanguageUpdate,
    UserJoined,
    UserLeft,
    Error,
}

/// Initial sync sent to a client right after a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateMessage {
    pub r#type: MessageType,
    pub language: String,
    pub code: String,
    pub user_count: usize,
}

/// New document text, fanned out to the sender's peers only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeUpdateMessage {
    pub r#type: MessageType,
    pub code: String,
}

/// New language tag, fanned out to the whole room including the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageUpdateMessage {
    pub r#type: MessageType,
    pub language: String,
}

/// Presence update sent to peers when a participant joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedMessage {
    pub r#type: MessageType,
    pub user_name: String,
    pub user_count: usize,
}

/// Presence update sent to remaining peers when a participant leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftMessage {
    pub r#type: MessageType,
    pub user_count: usize,
}

/// Protocol error surfaced once to the originating connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}
