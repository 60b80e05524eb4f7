// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Restaurants as served by the remote directory.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::lenient;
use crate::record::{Entity, EntityKind, Payload, Record};

/// Geocoordinate of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub latlng: LatLng,
    /// Photograph reference, without extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_favorite: bool,
    /// Opening hours keyed by day name.
    #[serde(default)]
    pub operating_hours: BTreeMap<String, String>,
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
    /// Set locally while a queued write references this restaurant.
    #[serde(default, skip_serializing)]
    pub pending: bool,
}

impl Restaurant {
    /// Creates a restaurant with the given id and name and empty details.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Restaurant {
            id,
            name: name.into(),
            address: String::new(),
            neighborhood: String::new(),
            cuisine_type: String::new(),
            latlng: LatLng::default(),
            photograph: None,
            is_favorite: false,
            operating_hours: BTreeMap::new(),
            created_at: None,
            updated_at: None,
            pending: false,
        }
    }

    /// Relative URL of the restaurant's detail page.
    pub fn page_url(&self) -> String {
        format!("./restaurant.html?id={}", self.id)
    }

    /// Relative URL of the restaurant's image; missing photographs map to
    /// the `404` placeholder.
    pub fn image_url(&self) -> String {
        let photo = self
            .photograph
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("404");
        format!("/img/{photo}.jpg")
    }

    /// Remote path that sets the favorite flag, e.g.
    /// `/restaurants/3/?is_favorite=true`.
    pub fn favorite_path(id: i64, favorite: bool) -> String {
        format!("{}/?is_favorite={}", EntityKind::Restaurants.item_path(id), favorite)
    }
}

impl Entity for Restaurant {
    const KIND: EntityKind = EntityKind::Restaurants;

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
        Record::Restaurant(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Restaurant(r) => Some(r),
            Record::Review(_) => None,
        }
    }
}

impl Payload for Restaurant {
    type Entity = Restaurant;

    fn target_id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn set_target_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.id == 0 {
            errors.push(FieldError::new("id", "must be a non-zero integer"));
        }
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "cannot be empty"));
        }
        crate::validate::finish(errors)
    }

    fn sanitized(self) -> Self {
        self
    }

    fn to_entity(&self, id: i64, now: DateTime<Utc>, previous: Option<&Restaurant>) -> Restaurant {
        let mut restaurant = self.clone();
        restaurant.id = id;
        restaurant.created_at = previous
            .and_then(|p| p.created_at)
            .or(self.created_at)
            .or(Some(now));
        restaurant.updated_at = Some(now);
        restaurant
    }
}

#[cfg(test)]
#[path = "restaurant_tests.rs"]
mod tests;
