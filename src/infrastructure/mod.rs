//! Infrastructure layer: concrete implementations of the domain traits plus
//! protocol DTOs, the debounced-write scheduler, and the per-room update
//! sequencer.

pub mod debounce;
pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod sequencer;
