//! Data Transfer Objects for the interview server.
//!
//! DTOs are organized by protocol:
//! - `ws`: WebSocket event DTOs
//! - `http`: HTTP API request/response DTOs
//!
//! Wire field names are camelCase to match the browser client's JSON.

pub mod conversion;
pub mod http;
pub mod ws;
