//! Shared utilities: logging, time, and token generation.

pub mod logger;
pub mod time;
pub mod token;
