// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity collections and the records stored in them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::restaurant::Restaurant;
use crate::review::Review;

/// The entity collections known to the local store and the remote service.
///
/// Doubles as the `foreignStore` of a pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Restaurants,
    Reviews,
}

impl EntityKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Restaurants => "restaurants",
            EntityKind::Reviews => "reviews",
        }
    }

    /// Path of the remote collection, e.g. `/reviews`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Path of a single remote item, e.g. `/reviews/7`.
    pub fn item_path(&self, id: i64) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "restaurants" | "restaurant" => Ok(EntityKind::Restaurants),
            "reviews" | "review" => Ok(EntityKind::Reviews),
            _ => Err(Error::InvalidEntityKind(s.to_string())),
        }
    }
}

/// A record of any kind, as held by the local store.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Restaurant(Restaurant),
    Review(Review),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Restaurant(_) => EntityKind::Restaurants,
            Record::Review(_) => EntityKind::Reviews,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Restaurant(r) => r.id,
            Record::Review(r) => r.id,
        }
    }

    /// Whether a queued write still references this record.
    pub fn is_pending(&self) -> bool {
        match self {
            Record::Restaurant(r) => r.pending,
            Record::Review(r) => r.pending,
        }
    }

    pub fn set_id(&mut self, id: i64) {
        match self {
            Record::Restaurant(r) => r.id = id,
            Record::Review(r) => r.id = id,
        }
    }

    pub fn set_pending(&mut self, pending: bool) {
        match self {
            Record::Restaurant(r) => r.pending = pending,
            Record::Review(r) => r.pending = pending,
        }
    }

    /// Takes the creation time from `local` when this copy has none.
    pub fn keep_created_at(&mut self, local: &Record) {
        match (self, local) {
            (Record::Restaurant(r), Record::Restaurant(l)) => r.keep_created_at(l),
            (Record::Review(r), Record::Review(l)) => r.keep_created_at(l),
            _ => {}
        }
    }

    /// Decodes a record of the given kind from a remote JSON document.
    pub fn from_value(kind: EntityKind, value: serde_json::Value) -> Result<Record> {
        Ok(match kind {
            EntityKind::Restaurants => Record::Restaurant(serde_json::from_value(value)?),
            EntityKind::Reviews => Record::Review(serde_json::from_value(value)?),
        })
    }
}

impl From<Restaurant> for Record {
    fn from(r: Restaurant) -> Self {
        Record::Restaurant(r)
    }
}

impl From<Review> for Record {
    fn from(r: Review) -> Self {
        Record::Review(r)
    }
}

/// A typed entity that lives in one collection.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this entity belongs to.
    const KIND: EntityKind;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn is_pending(&self) -> bool;

    fn set_pending(&mut self, pending: bool);

    /// Takes the creation time from `local` when this copy has none.
    fn keep_created_at(&mut self, local: &Self);

    fn into_record(self) -> Record;

    /// Extracts the entity from a record of the matching kind.
    fn from_record(record: Record) -> Option<Self>;
}

/// A user-submitted write for an entity.
///
/// Payloads are validated and sanitized before anything is persisted; the
/// serialized payload is the body sent to the remote service.
pub trait Payload: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    type Entity: Entity;

    /// Id of the entity this payload targets, if it already has one.
    fn target_id(&self) -> Option<i64>;

    /// Assigns the target id (used when a provisional id is rebound).
    fn set_target_id(&mut self, id: i64);

    /// Checks structural rules, collecting every failing field.
    fn validate(&self) -> Result<()>;

    /// Returns the payload with user text made safe for storage and display.
    fn sanitized(self) -> Self;

    /// Builds the local copy of the entity this payload describes.
    ///
    /// `previous` is the record being replaced, if any, so fields the payload
    /// does not carry (timestamps, favorites, ...) survive the update.
    fn to_entity(&self, id: i64, now: DateTime<Utc>, previous: Option<&Self::Entity>)
        -> Self::Entity;
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
