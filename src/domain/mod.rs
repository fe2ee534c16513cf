//! Domain layer: entities, value objects, and the traits the usecase layer
//! depends on. Concrete implementations live in the infrastructure layer
//! (dependency inversion).

mod ids;
mod pusher;
mod registry;
mod room;
mod session;
mod store;

pub use ids::{ClientId, InvalidClientId, ROOM_ID_LEN, RoomId, RoomIdFactory, Timestamp};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::{RegistryError, RoomRegistry};
pub use room::Room;
pub use session::{CODE_HISTORY_LIMIT, CodeSnapshot, SessionRecord};
pub use store::{SessionStore, StoreError};

#[cfg(test)]
pub use store::MockSessionStore;
