// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural validation for submitted payloads.

use crate::error::{Error, FieldError, Result};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MIN_COMMENTS_LENGTH: usize = 1;
pub const MAX_COMMENTS_LENGTH: usize = 140;

/// Validate a reference to another record (restaurant id, review id).
pub fn validate_id(field: &'static str, id: i64) -> std::result::Result<(), FieldError> {
    if id <= 0 {
        return Err(FieldError::new(field, format!("must be a positive integer, got {id}")));
    }
    Ok(())
}

/// Validate a reviewer name: one or more ASCII letters, nothing else.
pub fn validate_name(name: &str) -> std::result::Result<(), FieldError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FieldError::new(
            "name",
            "must be only letters A-Z, a-z. No numbers or special characters",
        ));
    }
    Ok(())
}

/// Validate a rating is a whole number within bounds.
pub fn validate_rating(rating: i64) -> std::result::Result<(), FieldError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(FieldError::new(
            "rating",
            format!("must be a whole number between {MIN_RATING} and {MAX_RATING}, got {rating}"),
        ));
    }
    Ok(())
}

/// Validate comment length in characters (before escaping).
pub fn validate_comments(comments: &str) -> std::result::Result<(), FieldError> {
    let len = comments.chars().count();
    if !(MIN_COMMENTS_LENGTH..=MAX_COMMENTS_LENGTH).contains(&len) {
        return Err(FieldError::new(
            "comments",
            format!(
                "must be between {MIN_COMMENTS_LENGTH} and {MAX_COMMENTS_LENGTH} characters, got {len}"
            ),
        ));
    }
    Ok(())
}

/// Turn collected field errors into a result.
pub fn finish(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidInput(errors))
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
