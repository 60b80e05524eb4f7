// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bistro-core: Shared library for the bistro restaurant directory
//!
//! This crate provides the data model (restaurants, reviews, pending
//! operations), structural validation, and the SQLite-backed local store used
//! by the `bistro` client and its sync reconciler.

pub mod db;
pub mod error;
pub mod escape;
pub mod lenient;
pub mod pending;
pub mod record;
pub mod restaurant;
pub mod review;
pub mod validate;

pub use db::Database;
pub use error::{Error, FieldError, Result};
pub use pending::{Method, NewPendingOperation, PendingOperation};
pub use record::{Entity, EntityKind, Payload, Record};
pub use restaurant::{LatLng, Restaurant};
pub use review::{Review, ReviewPayload};
