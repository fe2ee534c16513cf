//! Collaborative coding-interview server library.
//!
//! Provides the room synchronization engine (real-time shared code editing
//! over WebSocket with best-effort session persistence) and the sandboxed
//! multi-language snippet runner behind an axum HTTP/WebSocket surface.

// layers
pub mod domain;
pub mod infrastructure;
pub mod runner;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
