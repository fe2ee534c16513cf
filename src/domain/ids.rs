//! Identifier and timestamp value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::token::random_token;

/// Length of generated room identifiers (base-36 characters).
pub const ROOM_ID_LEN: usize = 9;

/// Opaque room/session identifier.
///
/// Generated ids come from [`RoomIdFactory`]; arbitrary strings (e.g. from
/// URL paths) can be wrapped with [`RoomId::new`] for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory for fresh room identifiers.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a short random base-36 room id.
    ///
    /// Best-effort uniqueness, not a security boundary.
    pub fn generate() -> RoomId {
        RoomId(random_token(ROOM_ID_LEN))
    }
}

/// Error returned when constructing a [`ClientId`] from an empty string.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("client id must not be empty")]
pub struct InvalidClientId;

/// Identifier of one WebSocket connection.
///
/// One connection equals one participant; the server generates these, so a
/// display name is carried separately in the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidClientId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidClientId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh connection id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in UTC milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
