// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-record async locks.
//!
//! A write for a record holds that record's lock from the pending-queue
//! check until the write is either confirmed or queued, and a drain holds it
//! from replay until the entry is removed. Writes to different records never
//! contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use bistro_core::EntityKind;

/// Lock key: the `(foreignStore, foreignKey)` of a record.
pub type Key = (EntityKind, i64);

/// A set of async mutexes keyed by record.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<Key, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: Key) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Entries nobody holds or waits on can go.
            locks.retain(|k, lock| *k == key || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
