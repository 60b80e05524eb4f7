// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::api::ApiError;
use crate::store::StoreError;
use crate::sync::SyncError;

/// All errors the `bistro` commands can end with.
///
/// Messages are user-facing; some carry a hint on a second line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("restaurant {0} not found\n  hint: run 'bistro restaurants' while online to refresh the cache")]
    RestaurantNotFound(i64),

    #[error("drain incomplete: {failed} failed, {remaining} still pending")]
    DrainIncomplete { failed: usize, remaining: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bistro operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<bistro_core::Error> for Error {
    fn from(e: bistro_core::Error) -> Self {
        Error::Sync(SyncError::from(e))
    }
}

impl Error {
    /// Field-level messages when the error came from invalid input.
    pub fn field_errors(&self) -> &[bistro_core::FieldError] {
        match self {
            Error::Sync(e) => e.field_errors(),
            _ => &[],
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
