//! Message pusher trait: fan-out of server events to connected clients.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ClientId;

/// Channel used to push serialized messages to one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, thiserror::Error)]
pub enum MessagePushError {
    #[error("client not found: {0}")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Abstraction over the outbound message path.
///
/// Broadcast delivery is best-effort: a failure to reach one peer never
/// fails the whole fan-out and is never retried.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's sender channel.
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// Remove a connection's sender channel.
    async fn unregister_client(&self, client_id: &ClientId);

    /// Push a message to a single connection.
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError>;

    /// Push a message to each target connection, tolerating per-target failures.
    async fn broadcast(&self, targets: Vec<ClientId>, content: &str)
    -> Result<(), MessagePushError>;
}
