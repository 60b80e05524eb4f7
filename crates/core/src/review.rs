// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Restaurant reviews and the payload users submit to create or edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::escape::escape_html;
use crate::lenient;
use crate::record::{Entity, EntityKind, Payload, Record};
use crate::validate::{finish, validate_comments, validate_id, validate_name, validate_rating};

/// A review of a restaurant.
///
/// Ids are assigned by the remote service. A review written locally before
/// the remote confirmed it carries a negative, provisional id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub restaurant_id: i64,
    pub name: String,
    #[serde(deserialize_with = "lenient::int")]
    pub rating: i64,
    pub comments: String,
    #[serde(
        rename = "createdAt",
        alias = "created_at",
        default,
        with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        alias = "updated_at",
        default,
        with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set locally while a queued write references this review.
    #[serde(default, skip_serializing)]
    pub pending: bool,
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Reviews;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }

    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    fn keep_created_at(&mut self, local: &Self) {
        if self.created_at.is_none() {
            self.created_at = local.created_at;
        }
    }

    fn into_record(self) -> Record {
        Record::Review(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Review(r) => Some(r),
            Record::Restaurant(_) => None,
        }
    }
}

/// The fields a user submits for a review.
///
/// Serialized as-is, this is the body sent to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    /// Present when editing an existing review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub restaurant_id: i64,
    pub name: String,
    pub rating: i64,
    pub comments: String,
}

impl ReviewPayload {
    pub fn new(
        restaurant_id: i64,
        name: impl Into<String>,
        rating: i64,
        comments: impl Into<String>,
    ) -> Self {
        ReviewPayload {
            id: None,
            restaurant_id,
            name: name.into(),
            rating,
            comments: comments.into(),
        }
    }

    /// Targets an existing review.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Payload for ReviewPayload {
    type Entity = Review;

    fn target_id(&self) -> Option<i64> {
        self.id
    }

    fn set_target_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if let Some(id) = self.id {
            if id == 0 {
                errors.push(FieldError::new("id", "must be a non-zero integer"));
            }
        }
        let checks = [
            validate_id("restaurant_id", self.restaurant_id),
            validate_name(&self.name),
            validate_rating(self.rating),
            validate_comments(&self.comments),
        ];
        errors.extend(checks.into_iter().filter_map(|c| c.err()));
        finish(errors)
    }

    fn sanitized(mut self) -> Self {
        self.name = escape_html(&self.name);
        self.comments = escape_html(&self.comments);
        self
    }

    fn to_entity(&self, id: i64, now: DateTime<Utc>, previous: Option<&Review>) -> Review {
        Review {
            id,
            restaurant_id: self.restaurant_id,
            name: self.name.clone(),
            rating: self.rating,
            comments: self.comments.clone(),
            created_at: previous.and_then(|p| p.created_at).or(Some(now)),
            updated_at: Some(now),
            pending: false,
        }
    }
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
