// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bistro-core operations.

use std::fmt;

use thiserror::Error;

/// A single field that failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field (`name`, `rating`, `comments`, ...).
    pub field: &'static str,
    /// Human readable explanation, suitable for showing next to the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All possible errors that can occur in bistro-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(i64),

    #[error("review not found: {0}")]
    ReviewNotFound(i64),

    #[error("pending operation not found: {0}")]
    PendingNotFound(i64),

    #[error("invalid entity kind: '{0}'\n  hint: valid kinds are: restaurants, reviews")]
    InvalidEntityKind(String),

    #[error("invalid method: '{0}'\n  hint: valid methods are: GET, POST, PUT, DELETE")]
    InvalidMethod(String),

    #[error("invalid input: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidInput(Vec<FieldError>),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns the field-level messages of an [`Error::InvalidInput`].
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::InvalidInput(fields) => fields,
            _ => &[],
        }
    }
}

/// A specialized Result type for bistro-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
