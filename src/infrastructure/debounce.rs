//! Per-room single-slot scheduler for coalescing persistence writes.
//!
//! Scheduling a write for a room cancels any pending write for the same room
//! and installs a new deadline, so a rapid burst of edits produces at most
//! one store write once the burst goes quiet. The action runs on its own
//! task and therefore never blocks the caller.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::RoomId;

struct PendingWrite {
    seq: u64,
    handle: JoinHandle<()>,
}

pub struct DebounceScheduler {
    delay: Duration,
    next_seq: AtomicU64,
    pending: Mutex<HashMap<RoomId, PendingWrite>>,
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_seq: AtomicU64::new(0),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule `action` to run after the debounce delay, replacing any
    /// pending action for the same room.
    pub async fn schedule<F>(self: &Arc<Self>, key: RoomId, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let scheduler = Arc::clone(self);
        let delay = self.delay;
        let task_key = key.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
            // Drop our own slot entry, but only if it has not been replaced
            // by a newer schedule in the meantime.
            let mut pending = scheduler.pending.lock().await;
            if pending.get(&task_key).is_some_and(|p| p.seq == seq) {
                pending.remove(&task_key);
            }
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.insert(key, PendingWrite { seq, handle }) {
            previous.handle.abort();
        }
    }

    /// Number of rooms with a write currently pending.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
