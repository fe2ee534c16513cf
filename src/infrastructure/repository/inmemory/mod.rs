//! In-memory implementations of the registry and session store.

mod registry;
mod session;

pub use registry::InMemoryRoomRegistry;
pub use session::InMemorySessionStore;
