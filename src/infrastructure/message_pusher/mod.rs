//! Message pusher implementations.

mod websocket;

pub use websocket::WebSocketMessagePusher;
