// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline write queue and sync reconciler.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Reconciler  │────►│  RemoteApi  │────►│   Remote    │
//! │              │◄────│   (trait)   │◄────│   Service   │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  LocalStore  │  (records + pending queue)
//! │   (trait)    │
//! └──────────────┘
//! ```
//!
//! # Features
//!
//! - Optimistic local writes with a durable pending queue
//! - Ordered replay per record, with per-record locks
//! - Provisional ids for records created offline, rebound on confirmation
//! - Injectable API and store traits for testing

mod locks;
mod outcome;
mod reconciler;

pub use locks::{Key, KeyLocks};
pub use outcome::{Deleted, DrainPolicy, DrainReport, PendingCause, SubmitOutcome, SyncError};
pub use reconciler::Reconciler;

#[cfg(test)]
pub(crate) mod test_helpers;
