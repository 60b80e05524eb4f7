// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! [`LocalStore`] over a SQLite [`Database`].

use std::path::Path;
use std::sync::Mutex;

use futures_util::future::BoxFuture;

use bistro_core::{
    Database, EntityKind, Error as CoreError, NewPendingOperation, PendingOperation, Record,
    Review,
};

use super::{LocalStore, StoreError, StoreResult};

/// SQLite-backed local store.
///
/// Statements are short and run inline on the calling task; the mutex is
/// never held across an await point.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Open (creating and migrating if needed) the store at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn new(db: Database) -> Self {
        SqliteStore { db: Mutex::new(db) }
    }

    fn with_db<T>(
        &self,
        f: impl FnOnce(&mut Database) -> bistro_core::Result<T>,
    ) -> StoreResult<T> {
        let mut db = self.db.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut db)?)
    }
}

impl LocalStore for SqliteStore {
    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, StoreResult<Vec<Record>>> {
        Box::pin(async move { self.with_db(|db| db.list_records(kind)) })
    }

    fn get_by_id(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<Option<Record>>> {
        Box::pin(async move { self.with_db(|db| db.get_record(kind, id)) })
    }

    fn put<'a>(&'a self, record: &'a Record) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move { self.with_db(|db| db.put_record(record)) })
    }

    fn delete(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move { self.with_db(|db| db.delete_record(kind, id)) })
    }

    fn reviews_for(&self, restaurant_id: i64) -> BoxFuture<'_, StoreResult<Vec<Review>>> {
        Box::pin(async move { self.with_db(|db| db.list_reviews_for(restaurant_id)) })
    }

    fn mirror<'a>(&'a self, records: &'a [Record]) -> BoxFuture<'a, StoreResult<usize>> {
        Box::pin(async move { self.with_db(|db| db.mirror_records(records)) })
    }

    fn allocate_provisional_id(&self, kind: EntityKind) -> BoxFuture<'_, StoreResult<i64>> {
        Box::pin(async move { self.with_db(|db| db.next_provisional_id(kind)) })
    }

    fn record_rebound(
        &self,
        kind: EntityKind,
        provisional_id: i64,
        confirmed_id: i64,
    ) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async move {
            self.with_db(|db| db.record_rebound(kind, provisional_id, confirmed_id))
        })
    }

    fn resolve_id(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<i64>> {
        Box::pin(async move { self.with_db(|db| db.resolve_id(kind, id)) })
    }

    fn set_pending_marker(
        &self,
        kind: EntityKind,
        id: i64,
        pending: bool,
    ) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move { self.with_db(|db| db.set_pending_marker(kind, id, pending)) })
    }

    fn add_pending<'a>(
        &'a self,
        op: &'a NewPendingOperation,
    ) -> BoxFuture<'a, StoreResult<PendingOperation>> {
        Box::pin(async move { self.with_db(|db| db.add_pending(op)) })
    }

    fn list_pending(&self) -> BoxFuture<'_, StoreResult<Vec<PendingOperation>>> {
        Box::pin(async move { self.with_db(|db| db.list_pending()) })
    }

    fn list_pending_for(
        &self,
        kind: EntityKind,
        key: i64,
    ) -> BoxFuture<'_, StoreResult<Vec<PendingOperation>>> {
        Box::pin(async move { self.with_db(|db| db.list_pending_for(kind, key)) })
    }

    fn get_pending(&self, seq: i64) -> BoxFuture<'_, StoreResult<Option<PendingOperation>>> {
        Box::pin(async move {
            match self.with_db(|db| db.get_pending(seq)) {
                Ok(op) => Ok(Some(op)),
                Err(StoreError::Core(CoreError::PendingNotFound(_))) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    fn update_pending<'a>(&'a self, op: &'a PendingOperation) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            self.with_db(|db| db.update_pending(op))
                .map_err(|e| match e {
                    StoreError::Core(CoreError::PendingNotFound(seq)) => {
                        StoreError::PendingNotFound(seq)
                    }
                    other => other,
                })
        })
    }

    fn remove_pending(&self, seq: i64) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move { self.with_db(|db| db.remove_pending(seq)) })
    }

    fn count_pending(&self) -> BoxFuture<'_, StoreResult<usize>> {
        Box::pin(async move { self.with_db(|db| db.count_pending()) })
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
