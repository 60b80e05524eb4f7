// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Results of reconciler operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use bistro_core::{EntityKind, FieldError, PendingOperation, Record};

use crate::store::StoreError;

/// Why a write failed without being queued.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The payload broke a structural rule. Nothing was written.
    #[error("invalid input: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidInput(Vec<FieldError>),

    /// The remote could not be reached. Only surfaced by reads and drains;
    /// writes queue instead.
    #[error("network error: {0}")]
    Network(String),

    /// The remote refused the write with a status that will not change on
    /// retry.
    #[error("remote rejected the request with status {status}")]
    RemoteRejected { status: u16 },

    /// The local store failed; the operation was aborted.
    #[error("local store error: {0}")]
    LocalStore(#[from] StoreError),
}

impl SyncError {
    /// Field-level messages, empty unless this is [`SyncError::InvalidInput`].
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SyncError::InvalidInput(fields) => fields,
            _ => &[],
        }
    }
}

impl From<bistro_core::Error> for SyncError {
    fn from(e: bistro_core::Error) -> Self {
        match e {
            bistro_core::Error::InvalidInput(fields) => SyncError::InvalidInput(fields),
            other => SyncError::LocalStore(StoreError::Core(other)),
        }
    }
}

/// Why a write ended up in the pending queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCause {
    /// The remote could not be reached.
    Network(String),
    /// The remote answered with a retryable status.
    Rejected { status: u16 },
    /// Earlier writes for the same record are still queued.
    QueuedBehind { ahead: usize },
}

impl fmt::Display for PendingCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingCause::Network(msg) => write!(f, "remote unreachable ({msg})"),
            PendingCause::Rejected { status } => write!(f, "remote answered {status}"),
            PendingCause::QueuedBehind { ahead } => {
                write!(f, "queued behind {ahead} earlier request(s)")
            }
        }
    }
}

/// The single terminal result of a submit.
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// Applied locally and confirmed by the remote.
    Synced(E),
    /// Applied locally; the remote write is queued.
    Pending {
        entity: E,
        operation: PendingOperation,
        cause: PendingCause,
    },
    /// Nothing was applied (or the optimistic change was rolled back).
    Failed(SyncError),
}

impl<E> SubmitOutcome<E> {
    pub fn is_synced(&self) -> bool {
        matches!(self, SubmitOutcome::Synced(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitOutcome::Pending { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SubmitOutcome::Failed(_))
    }

    /// The entity as it now stands locally, unless the submit failed.
    pub fn entity(&self) -> Option<&E> {
        match self {
            SubmitOutcome::Synced(entity) | SubmitOutcome::Pending { entity, .. } => Some(entity),
            SubmitOutcome::Failed(_) => None,
        }
    }

    /// The queued operation, for pending outcomes.
    pub fn operation(&self) -> Option<&PendingOperation> {
        match self {
            SubmitOutcome::Pending { operation, .. } => Some(operation),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            SubmitOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Converts into a `Result`, treating queued writes as success.
    pub fn into_result(self) -> Result<E, SyncError> {
        match self {
            SubmitOutcome::Synced(entity) | SubmitOutcome::Pending { entity, .. } => Ok(entity),
            SubmitOutcome::Failed(e) => Err(e),
        }
    }
}

/// The record a delete targeted.
#[derive(Debug, Clone, PartialEq)]
pub struct Deleted {
    pub kind: EntityKind,
    pub id: i64,
    /// The local copy before deletion, if one was cached.
    pub previous: Option<Record>,
}

/// What a drain does when a replay fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainPolicy {
    /// Hold back the rest of that record's queue and go on with other records.
    #[default]
    SkipKey,
    /// End the drain at the first failure.
    Stop,
}

impl fmt::Display for DrainPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainPolicy::SkipKey => write!(f, "skip_key"),
            DrainPolicy::Stop => write!(f, "stop"),
        }
    }
}

/// Tally of one drain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Replayed and confirmed.
    pub replayed: usize,
    /// Deletes the remote had already applied.
    pub dropped: usize,
    /// Replays that failed and stay queued.
    pub failed: usize,
    /// Entries not attempted because an earlier entry for the same record failed.
    pub blocked: usize,
    /// Queue length after the drain.
    pub remaining: usize,
    /// The drain ended early on a failure (`stop` policy).
    pub stopped: bool,
    /// The drain ended early on cancellation.
    pub cancelled: bool,
}

impl DrainReport {
    /// True when nothing is left to replay.
    pub fn is_clean(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
