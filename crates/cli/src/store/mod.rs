// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local store abstraction.
//!
//! The [`LocalStore`] trait is the asynchronous face of the client-side
//! database: mirrored records plus the pending-operations queue.
//! [`SqliteStore`] backs it with [`bistro_core::Database`].

mod sqlite;

pub use sqlite::SqliteStore;

use futures_util::future::BoxFuture;

use bistro_core::{EntityKind, NewPendingOperation, PendingOperation, Record, Review};

/// Error type for local store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} is not in the local store")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("pending operation #{0} is not queued")]
    PendingNotFound(i64),

    #[error("local store is unavailable: a previous operation panicked")]
    Poisoned,

    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] bistro_core::Error),
}

/// Result type for local store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Local persistence for records and pending operations.
///
/// Implementations must be safe to call concurrently; callers serialize
/// writes to the same record themselves.
pub trait LocalStore: Send + Sync {
    /// Every record of a kind.
    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, StoreResult<Vec<Record>>>;

    /// One record, `None` if absent.
    fn get_by_id(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<Option<Record>>>;

    /// Insert or replace a record.
    fn put<'a>(&'a self, record: &'a Record) -> BoxFuture<'a, StoreResult<()>>;

    /// Remove a record. Returns whether it existed.
    fn delete(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<bool>>;

    /// Reviews of one restaurant, including locally written ones.
    fn reviews_for(&self, restaurant_id: i64) -> BoxFuture<'_, StoreResult<Vec<Review>>>;

    /// Upsert records fetched remotely, keeping those with a pending marker.
    fn mirror<'a>(&'a self, records: &'a [Record]) -> BoxFuture<'a, StoreResult<usize>>;

    /// A fresh negative id for a record the remote has not confirmed.
    fn allocate_provisional_id(&self, kind: EntityKind) -> BoxFuture<'_, StoreResult<i64>>;

    /// Remember that a provisional id was confirmed as `confirmed_id`.
    fn record_rebound(
        &self,
        kind: EntityKind,
        provisional_id: i64,
        confirmed_id: i64,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// The id a record goes by now, following confirmed provisional ids.
    fn resolve_id(&self, kind: EntityKind, id: i64) -> BoxFuture<'_, StoreResult<i64>>;

    /// Set or clear the pending marker. Returns whether the record exists.
    fn set_pending_marker(
        &self,
        kind: EntityKind,
        id: i64,
        pending: bool,
    ) -> BoxFuture<'_, StoreResult<bool>>;

    /// Append to the pending queue.
    fn add_pending<'a>(
        &'a self,
        op: &'a NewPendingOperation,
    ) -> BoxFuture<'a, StoreResult<PendingOperation>>;

    /// The whole queue, in enqueue order.
    fn list_pending(&self) -> BoxFuture<'_, StoreResult<Vec<PendingOperation>>>;

    /// Queued operations for one record, in enqueue order.
    fn list_pending_for(
        &self,
        kind: EntityKind,
        key: i64,
    ) -> BoxFuture<'_, StoreResult<Vec<PendingOperation>>>;

    /// One queued operation, `None` if it is no longer queued.
    fn get_pending(&self, seq: i64) -> BoxFuture<'_, StoreResult<Option<PendingOperation>>>;

    /// Rewrite a queued operation in place.
    fn update_pending<'a>(&'a self, op: &'a PendingOperation) -> BoxFuture<'a, StoreResult<()>>;

    /// Remove a queued operation. Returns whether it was still queued.
    fn remove_pending(&self, seq: i64) -> BoxFuture<'_, StoreResult<bool>>;

    /// Number of queued operations.
    fn count_pending(&self) -> BoxFuture<'_, StoreResult<usize>>;
}
