//! Per-owner commit serialization inside one process
//!
//! Storage stays the authority; this only keeps same-owner commits from
//! queueing up inside the database. Different owners never share a lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct OwnerLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the owner's lock. Held until the guard drops.
    pub async fn acquire(&self, owner_id: &str) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(&*self.locks.entry(owner_id.to_string()).or_default());
        lock.lock_owned().await
    }

    /// Drops entries nobody holds or waits on.
    pub fn prune_idle(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
