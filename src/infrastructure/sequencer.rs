//! Per-room critical section for mutate-then-fanout operations.
//!
//! A room update is only correct if peers receive updates in the order the
//! room applied them. Holding the room's slot across both the registry write
//! and the enqueue onto the pusher channels makes that pair atomic per room;
//! channel sends never block, so the section stays short and persistence can
//! still happen later, off this path.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

pub struct RoomSequencer {
    slots: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomSequencer {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the room's slot. Updates for one room are applied and fanned
    /// out strictly one at a time; distinct rooms do not contend.
    pub async fn acquire(&self, id: &RoomId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(id.clone()).or_default().clone()
        };
        slot.lock_owned().await
    }

    /// Forget the room's slot once the room is gone.
    pub async fn remove(&self, id: &RoomId) {
        self.slots.lock().await.remove(id);
    }

    #[cfg(test)]
    pub async fn slot_count(&self) -> usize {
        self.slots.lock().await.len()
    }
}

impl Default for RoomSequencer {
    fn default() -> Self {
        Self::new()
    }
}
