// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync reconciler.
//!
//! Every write is applied to the local store first and then sent to the
//! remote service. If the remote cannot confirm it (unreachable, or a
//! retryable status) the write is recorded in the pending queue and the
//! caller gets [`SubmitOutcome::Pending`]. [`Reconciler::drain_pending`]
//! replays the queue later, in enqueue order.
//!
//! Ordering per record is kept by two rules:
//!
//! - a write for a record that already has queued entries is queued behind
//!   them without contacting the remote;
//! - the record's lock is held from that check until the write is confirmed
//!   or queued, and by the drain from replay until removal.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use bistro_core::{
    Entity, EntityKind, FieldError, Method, NewPendingOperation, Payload, PendingOperation,
    Record, Restaurant,
};

use super::locks::{Key, KeyLocks};
use super::outcome::{Deleted, DrainPolicy, DrainReport, PendingCause, SubmitOutcome, SyncError};
use crate::api::{ApiError, ApiResponse, RemoteApi};
use crate::store::{LocalStore, StoreError};

/// How a remote write attempt ended.
enum Dispatch {
    /// The remote confirmed the write.
    Applied(ApiResponse),
    /// The write is in the pending queue.
    Queued {
        operation: PendingOperation,
        cause: PendingCause,
    },
    /// The remote refused the write for good.
    Rejected { status: u16 },
}

/// How a single replay ended.
enum Replay {
    Applied,
    /// A delete the remote had already applied.
    AlreadyApplied,
    Failed(String),
}

/// Keeps the local store and the remote service converging.
pub struct Reconciler<A: RemoteApi, S: LocalStore> {
    api: A,
    store: S,
    locks: KeyLocks,
    /// Serializes provisional id allocation with the insert that uses it.
    allocation: AsyncMutex<()>,
    /// Only one drain runs at a time.
    draining: AsyncMutex<()>,
    policy: DrainPolicy,
}

impl<A: RemoteApi, S: LocalStore> Reconciler<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Reconciler {
            api,
            store,
            locks: KeyLocks::new(),
            allocation: AsyncMutex::new(()),
            draining: AsyncMutex::new(()),
            policy: DrainPolicy::default(),
        }
    }

    /// Sets what a drain does when a replay fails.
    pub fn with_policy(mut self, policy: DrainPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DrainPolicy {
        self.policy
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────

    /// Create a new entity.
    ///
    /// The local copy gets a provisional (negative) id until the remote
    /// assigns one.
    pub async fn submit_create<P: Payload>(&self, payload: P) -> SubmitOutcome<P::Entity> {
        finish("create", self.create(payload).await)
    }

    /// Update an existing entity; the payload must carry its id.
    pub async fn submit_update<P: Payload>(&self, payload: P) -> SubmitOutcome<P::Entity> {
        finish("update", self.update(payload).await)
    }

    /// Delete an entity.
    pub async fn submit_delete(&self, kind: EntityKind, id: i64) -> SubmitOutcome<Deleted> {
        finish("delete", self.delete(kind, id).await)
    }

    /// Mark or unmark a restaurant as a favorite.
    pub async fn set_favorite(
        &self,
        restaurant_id: i64,
        favorite: bool,
    ) -> SubmitOutcome<Restaurant> {
        finish("favorite", self.favorite(restaurant_id, favorite).await)
    }

    async fn create<P: Payload>(
        &self,
        payload: P,
    ) -> Result<SubmitOutcome<P::Entity>, SyncError> {
        payload.validate()?;
        let payload = payload.sanitized();
        let kind = <P::Entity as Entity>::KIND;
        let body = serde_json::to_value(&payload).map_err(StoreError::from)?;

        let entity = {
            let _allocating = self.allocation.lock().await;
            let id = self.store.allocate_provisional_id(kind).await?;
            let mut entity = payload.to_entity(id, Utc::now(), None);
            entity.set_pending(true);
            self.store.put(&entity.clone().into_record()).await?;
            entity
        };
        let id = entity.id();
        debug!("created {} {} locally", kind, id);

        let _guard = self.locks.lock((kind, id)).await;
        let request =
            NewPendingOperation::new(kind, id, Method::Post, kind.collection_path(), Some(body));

        Ok(match self.dispatch(request).await? {
            Dispatch::Applied(response) => {
                SubmitOutcome::Synced(self.confirm(entity, &response).await?)
            }
            Dispatch::Queued { operation, cause } => SubmitOutcome::Pending {
                entity,
                operation,
                cause,
            },
            Dispatch::Rejected { status } => {
                self.store.delete(kind, id).await?;
                SubmitOutcome::Failed(SyncError::RemoteRejected { status })
            }
        })
    }

    async fn update<P: Payload>(
        &self,
        payload: P,
    ) -> Result<SubmitOutcome<P::Entity>, SyncError> {
        let Some(id) = payload.target_id() else {
            return Err(SyncError::InvalidInput(vec![FieldError::new(
                "id",
                "is required to update",
            )]));
        };
        payload.validate()?;
        let mut payload = payload.sanitized();
        let kind = <P::Entity as Entity>::KIND;

        let (id, _guard) = self.lock_current(kind, id).await?;
        payload.set_target_id(id);
        let body = serde_json::to_value(&payload).map_err(StoreError::from)?;
        let previous = self
            .store
            .get_by_id(kind, id)
            .await?
            .and_then(<P::Entity as Entity>::from_record);
        let mut entity = payload.to_entity(id, Utc::now(), previous.as_ref());
        entity.set_pending(true);
        self.store.put(&entity.clone().into_record()).await?;

        let request =
            NewPendingOperation::new(kind, id, Method::Put, kind.item_path(id), Some(body));
        Ok(match self.dispatch(request).await? {
            Dispatch::Applied(response) => {
                SubmitOutcome::Synced(self.confirm(entity, &response).await?)
            }
            Dispatch::Queued { operation, cause } => SubmitOutcome::Pending {
                entity,
                operation,
                cause,
            },
            Dispatch::Rejected { status } => {
                self.restore(kind, id, previous.map(Entity::into_record)).await?;
                SubmitOutcome::Failed(SyncError::RemoteRejected { status })
            }
        })
    }

    async fn favorite(
        &self,
        id: i64,
        favorite: bool,
    ) -> Result<SubmitOutcome<Restaurant>, SyncError> {
        if let Err(e) = bistro_core::validate::validate_id("restaurant_id", id) {
            return Err(SyncError::InvalidInput(vec![e]));
        }
        let kind = EntityKind::Restaurants;

        let _guard = self.locks.lock((kind, id)).await;
        let previous = self
            .store
            .get_by_id(kind, id)
            .await?
            .and_then(Restaurant::from_record)
            .ok_or(StoreError::NotFound { kind, id })?;
        let mut entity = previous.clone();
        entity.is_favorite = favorite;
        entity.updated_at = Some(Utc::now());
        entity.pending = true;
        self.store.put(&entity.clone().into_record()).await?;

        let request = NewPendingOperation::new(
            kind,
            id,
            Method::Put,
            Restaurant::favorite_path(id, favorite),
            None,
        );
        Ok(match self.dispatch(request).await? {
            Dispatch::Applied(response) => {
                SubmitOutcome::Synced(self.confirm(entity, &response).await?)
            }
            Dispatch::Queued { operation, cause } => SubmitOutcome::Pending {
                entity,
                operation,
                cause,
            },
            Dispatch::Rejected { status } => {
                self.restore(kind, id, Some(previous.into_record())).await?;
                SubmitOutcome::Failed(SyncError::RemoteRejected { status })
            }
        })
    }

    async fn delete(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<SubmitOutcome<Deleted>, SyncError> {
        if id == 0 {
            return Err(SyncError::InvalidInput(vec![FieldError::new(
                "id",
                "must be a non-zero integer",
            )]));
        }

        let (id, _guard) = self.lock_current(kind, id).await?;
        let previous = self.store.get_by_id(kind, id).await?;
        let deleted = Deleted {
            kind,
            id,
            previous: previous.clone(),
        };

        if id < 0 {
            // The remote never saw this record; forgetting it is enough.
            let queued = self.store.list_pending_for(kind, id).await?;
            for op in &queued {
                self.store.remove_pending(op.seq).await?;
            }
            self.store.delete(kind, id).await?;
            info!(
                "deleted unconfirmed {} {} and {} queued request(s)",
                kind,
                id,
                queued.len()
            );
            return Ok(SubmitOutcome::Synced(deleted));
        }

        self.store.delete(kind, id).await?;
        let request = NewPendingOperation::new(kind, id, Method::Delete, kind.item_path(id), None);
        Ok(match self.dispatch(request).await? {
            Dispatch::Applied(_) => SubmitOutcome::Synced(deleted),
            Dispatch::Queued { operation, cause } => SubmitOutcome::Pending {
                entity: deleted,
                operation,
                cause,
            },
            Dispatch::Rejected { status } => {
                self.restore(kind, id, previous).await?;
                SubmitOutcome::Failed(SyncError::RemoteRejected { status })
            }
        })
    }

    /// Lock the record `id` refers to now.
    ///
    /// A drain can confirm a provisional id while we wait on its lock; the
    /// record then lives under the confirmed id, so follow it there.
    async fn lock_current(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<(i64, OwnedMutexGuard<()>), SyncError> {
        let mut id = self.store.resolve_id(kind, id).await?;
        loop {
            let guard = self.locks.lock((kind, id)).await;
            let current = self.store.resolve_id(kind, id).await?;
            if current == id {
                return Ok((id, guard));
            }
            debug!("{} {} was confirmed as {} while waiting", kind, id, current);
            id = current;
        }
    }

    /// Send a write, or queue it if it cannot be confirmed now.
    ///
    /// The caller holds the record's lock.
    async fn dispatch(&self, request: NewPendingOperation) -> Result<Dispatch, SyncError> {
        let ahead = self
            .store
            .list_pending_for(request.foreign_store, request.foreign_key)
            .await?
            .len();
        if ahead > 0 {
            let operation = self.enqueue(&request).await?;
            return Ok(Dispatch::Queued {
                operation,
                cause: PendingCause::QueuedBehind { ahead },
            });
        }

        let result = self
            .api
            .request(request.method, &request.url, request.body.as_ref())
            .await;
        match result {
            Ok(response) if response.is_success() => Ok(Dispatch::Applied(response)),
            Ok(response) if request.method == Method::Delete && response.is_gone() => {
                debug!("{} {} was already gone", request.foreign_store, request.foreign_key);
                Ok(Dispatch::Applied(response))
            }
            Ok(response) if response.is_retryable() => {
                let operation = self.enqueue(&request).await?;
                Ok(Dispatch::Queued {
                    operation,
                    cause: PendingCause::Rejected {
                        status: response.status,
                    },
                })
            }
            Ok(response) => {
                warn!(
                    "{} {} rejected with status {}",
                    request.method, request.url, response.status
                );
                Ok(Dispatch::Rejected {
                    status: response.status,
                })
            }
            Err(e) => {
                let reason = match e {
                    ApiError::Network(msg) => msg,
                    other => other.to_string(),
                };
                let operation = self.enqueue(&request).await?;
                Ok(Dispatch::Queued {
                    operation,
                    cause: PendingCause::Network(reason),
                })
            }
        }
    }

    async fn enqueue(&self, request: &NewPendingOperation) -> Result<PendingOperation, SyncError> {
        let operation = self.store.add_pending(request).await?;
        if request.method != Method::Delete {
            self.store
                .set_pending_marker(request.foreign_store, request.foreign_key, true)
                .await?;
        }
        info!("queued {}", operation);
        Ok(operation)
    }

    /// Store the confirmed version of a write and clear its marker.
    ///
    /// The remote's copy wins when the response carries one.
    async fn confirm<E: Entity>(&self, local: E, response: &ApiResponse) -> Result<E, SyncError> {
        let mut confirmed = match response.decode::<E>() {
            Ok(Some(remote)) if remote.id() > 0 => remote,
            Ok(_) => local.clone(),
            Err(e) => {
                debug!("keeping local {} {}: {}", E::KIND, local.id(), e);
                local.clone()
            }
        };

        confirmed.keep_created_at(&local);
        confirmed.set_pending(false);
        if confirmed.id() == local.id() {
            self.store.put(&confirmed.clone().into_record()).await?;
        } else if local.id() < 0 {
            self.store.delete(E::KIND, local.id()).await?;
            self.store.put(&confirmed.clone().into_record()).await?;
            self.store
                .record_rebound(E::KIND, local.id(), confirmed.id())
                .await?;
            info!("{} {} confirmed as {}", E::KIND, local.id(), confirmed.id());
        } else {
            confirmed.set_id(local.id());
            self.store.put(&confirmed.clone().into_record()).await?;
        }
        Ok(confirmed)
    }

    /// Undo an optimistic change after a permanent rejection.
    async fn restore(
        &self,
        kind: EntityKind,
        id: i64,
        previous: Option<Record>,
    ) -> Result<(), SyncError> {
        match previous {
            Some(record) => self.store.put(&record).await?,
            None => {
                self.store.delete(kind, id).await?;
            }
        }
        debug!("rolled back {} {}", kind, id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queue
    // ─────────────────────────────────────────────────────────────────────

    /// Snapshot of the pending queue in enqueue order.
    pub async fn list_pending(&self) -> Result<Vec<PendingOperation>, SyncError> {
        Ok(self.store.list_pending().await?)
    }

    pub async fn pending_count(&self) -> Result<usize, SyncError> {
        Ok(self.store.count_pending().await?)
    }

    /// Replay the pending queue. See [`Reconciler::drain_pending_with`].
    pub async fn drain_pending(&self) -> Result<DrainReport, SyncError> {
        self.drain_pending_with(&CancellationToken::new()).await
    }

    /// Replay the pending queue in enqueue order.
    ///
    /// Confirmed entries are removed; failed ones stay. A failure holds back
    /// the rest of that record's entries (or ends the drain, under
    /// [`DrainPolicy::Stop`]). `cancel` is checked between replays only.
    pub async fn drain_pending_with(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DrainReport, SyncError> {
        let _draining = self.draining.lock().await;
        let mut report = DrainReport::default();
        let mut held_back: HashSet<Key> = HashSet::new();

        let snapshot = self.store.list_pending().await?;
        debug!("draining {} pending request(s)", snapshot.len());

        for queued in snapshot {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            // Earlier replays may have rebound this entry, or it was discarded.
            let Some(current) = self.store.get_pending(queued.seq).await? else {
                continue;
            };
            let key = current.key();
            if held_back.contains(&key) {
                report.blocked += 1;
                continue;
            }

            let _guard = self.locks.lock(key).await;
            let Some(op) = self.store.get_pending(queued.seq).await? else {
                continue;
            };

            match self.replay(&op).await? {
                Replay::Applied => report.replayed += 1,
                Replay::AlreadyApplied => report.dropped += 1,
                Replay::Failed(reason) => {
                    report.failed += 1;
                    warn!("replay of {} failed: {}", op, reason);
                    match self.policy {
                        DrainPolicy::SkipKey => {
                            held_back.insert(key);
                        }
                        DrainPolicy::Stop => {
                            report.stopped = true;
                            break;
                        }
                    }
                }
            }
        }

        report.remaining = self.store.count_pending().await?;
        info!(
            "drain finished: {} replayed, {} dropped, {} failed, {} remaining",
            report.replayed, report.dropped, report.failed, report.remaining
        );
        Ok(report)
    }

    /// Replay one entry. The caller holds its record's lock.
    async fn replay(&self, op: &PendingOperation) -> Result<Replay, SyncError> {
        let response = match self.api.request(op.method, &op.url, op.body.as_ref()).await {
            Ok(response) => response,
            Err(e) => return Ok(Replay::Failed(e.to_string())),
        };

        if response.is_success() {
            self.store.remove_pending(op.seq).await?;
            let key = self.rebind_confirmed(op, &response).await?;
            self.settle(op.method, key, Some(&response)).await?;
            info!("replayed {}", op);
            Ok(Replay::Applied)
        } else if op.method == Method::Delete && response.is_gone() {
            self.store.remove_pending(op.seq).await?;
            self.settle(op.method, op.key(), None).await?;
            info!("dropped {}: already applied", op);
            Ok(Replay::AlreadyApplied)
        } else {
            Ok(Replay::Failed(format!("remote answered {}", response.status)))
        }
    }

    /// After a replayed create, move the record and its later entries from
    /// the provisional id to the one the remote assigned.
    async fn rebind_confirmed(
        &self,
        op: &PendingOperation,
        response: &ApiResponse,
    ) -> Result<Key, SyncError> {
        let (kind, old_id) = op.key();
        if op.method != Method::Post || old_id >= 0 {
            return Ok((kind, old_id));
        }
        let Some(new_id) = response
            .body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(remote_id)
            .filter(|id| *id > 0)
        else {
            return Ok((kind, old_id));
        };

        if let Some(mut record) = self.store.get_by_id(kind, old_id).await? {
            self.store.delete(kind, old_id).await?;
            record.set_id(new_id);
            self.store.put(&record).await?;
        }
        for mut later in self.store.list_pending_for(kind, old_id).await? {
            later.rebind(new_id);
            self.store.update_pending(&later).await?;
        }
        // Last, so writes that resolve to the new id find its entries queued.
        self.store.record_rebound(kind, old_id, new_id).await?;
        info!("{} {} confirmed as {}", kind, old_id, new_id);
        Ok((kind, new_id))
    }

    /// Once a record's last entry is replayed, bring the local copy in line.
    async fn settle(
        &self,
        method: Method,
        key: Key,
        response: Option<&ApiResponse>,
    ) -> Result<(), SyncError> {
        let (kind, id) = key;
        if !self.store.list_pending_for(kind, id).await?.is_empty() {
            return Ok(());
        }
        if method == Method::Delete {
            self.store.delete(kind, id).await?;
            return Ok(());
        }

        let refreshed = response
            .and_then(|r| r.body.clone())
            .and_then(|body| Record::from_value(kind, body).ok())
            .filter(|record| record.id() == id);
        match refreshed {
            Some(mut record) => {
                if let Some(local) = self.store.get_by_id(kind, id).await? {
                    record.keep_created_at(&local);
                }
                record.set_pending(false);
                self.store.put(&record).await?;
            }
            None => {
                self.store.set_pending_marker(kind, id, false).await?;
            }
        }
        Ok(())
    }

    /// Drop a queued entry without replaying it.
    ///
    /// Discarding a queued create also forgets the unconfirmed record and any
    /// entries queued behind it.
    pub async fn discard_pending(&self, seq: i64) -> Result<PendingOperation, SyncError> {
        let mut key = self
            .store
            .get_pending(seq)
            .await?
            .ok_or(StoreError::PendingNotFound(seq))?
            .key();
        // A drain may rebind the entry while we wait for its lock.
        let (op, _guard) = loop {
            let guard = self.locks.lock(key).await;
            let op = self
                .store
                .get_pending(seq)
                .await?
                .ok_or(StoreError::PendingNotFound(seq))?;
            if op.key() == key {
                break (op, guard);
            }
            key = op.key();
        };
        let (kind, id) = op.key();

        self.store.remove_pending(seq).await?;
        if op.method == Method::Post && id < 0 {
            for later in self.store.list_pending_for(kind, id).await? {
                self.store.remove_pending(later.seq).await?;
            }
            self.store.delete(kind, id).await?;
        } else if op.method != Method::Delete
            && self.store.list_pending_for(kind, id).await?.is_empty()
        {
            self.store.set_pending_marker(kind, id, false).await?;
        }
        warn!("discarded {}", op);
        Ok(op)
    }
}

fn finish<E>(action: &str, result: Result<SubmitOutcome<E>, SyncError>) -> SubmitOutcome<E> {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{} failed: {}", action, e);
            SubmitOutcome::Failed(e)
        }
    }
}

/// Id from a remote document, which may encode it as a string.
fn remote_id(value: &Value) -> Option<i64> {
    bistro_core::lenient::int(value).ok()
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
