// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read side of the client: restaurant and review lookups.
//!
//! Every read asks the remote service first and mirrors the answer into the
//! local store, then answers from the store. When the remote cannot be
//! reached the store's copy is served as is, so browsing works offline.
//! Reading from the store after mirroring keeps local writes that have not
//! been confirmed yet visible.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use bistro_core::{Entity, EntityKind, Method, Record, Restaurant, Review};

use crate::api::RemoteApi;
use crate::store::LocalStore;
use crate::sync::{Key, SyncError};

/// Filter value that matches everything.
pub const ALL: &str = "all";

/// Where a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Fresh from the remote service.
    Remote,
    /// The local copy; the remote could not be reached.
    Cache,
}

/// Records plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub source: Source,
}

impl<T> Listing<T> {
    pub fn is_cached(&self) -> bool {
        self.source == Source::Cache
    }
}

/// Looks up restaurants and reviews.
pub struct Directory<'a, A: RemoteApi, S: LocalStore> {
    api: &'a A,
    store: &'a S,
}

impl<'a, A: RemoteApi, S: LocalStore> Directory<'a, A, S> {
    pub fn new(api: &'a A, store: &'a S) -> Self {
        Directory { api, store }
    }

    /// All restaurants, ordered by id.
    pub async fn restaurants(&self) -> Result<Listing<Restaurant>, SyncError> {
        let source = self
            .refresh::<Vec<Restaurant>>(&EntityKind::Restaurants.collection_path())
            .await?;
        let items = self.load(EntityKind::Restaurants).await?;
        Ok(Listing { items, source })
    }

    /// One restaurant, `None` if neither the remote nor the cache knows it.
    pub async fn restaurant(&self, id: i64) -> Result<Option<Restaurant>, SyncError> {
        self.refresh::<Restaurant>(&EntityKind::Restaurants.item_path(id))
            .await?;
        if self.hidden().await?.contains(&(EntityKind::Restaurants, id)) {
            return Ok(None);
        }
        Ok(self
            .store
            .get_by_id(EntityKind::Restaurants, id)
            .await?
            .and_then(Restaurant::from_record))
    }

    /// Restaurants marked as favorite, local changes included.
    pub async fn favorites(&self) -> Result<Listing<Restaurant>, SyncError> {
        let path = format!("{}/?is_favorite=true", EntityKind::Restaurants.collection_path());
        let source = self.refresh::<Vec<Restaurant>>(&path).await?;
        let items = self
            .load::<Restaurant>(EntityKind::Restaurants)
            .await?
            .into_iter()
            .filter(|r| r.is_favorite)
            .collect();
        Ok(Listing { items, source })
    }

    /// Reviews of one restaurant, including ones not yet confirmed.
    pub async fn reviews_for(&self, restaurant_id: i64) -> Result<Listing<Review>, SyncError> {
        let path = format!(
            "{}/?restaurant_id={}",
            EntityKind::Reviews.collection_path(),
            restaurant_id
        );
        let source = self.refresh::<Vec<Review>>(&path).await?;
        let hidden = self.hidden().await?;
        let items = self
            .store
            .reviews_for(restaurant_id)
            .await?
            .into_iter()
            .filter(|r| !hidden.contains(&(EntityKind::Reviews, r.id)))
            .collect();
        Ok(Listing { items, source })
    }

    /// Restaurants matching both filters; [`ALL`] disables a filter.
    pub async fn by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Result<Listing<Restaurant>, SyncError> {
        let listing = self.restaurants().await?;
        Ok(Listing {
            items: filter_restaurants(listing.items, cuisine, neighborhood),
            source: listing.source,
        })
    }

    /// Distinct neighborhoods, in first-seen order.
    pub async fn neighborhoods(&self) -> Result<Listing<String>, SyncError> {
        let listing = self.restaurants().await?;
        Ok(Listing {
            items: unique(listing.items.iter().map(|r| r.neighborhood.as_str())),
            source: listing.source,
        })
    }

    /// Distinct cuisines, in first-seen order.
    pub async fn cuisines(&self) -> Result<Listing<String>, SyncError> {
        let listing = self.restaurants().await?;
        Ok(Listing {
            items: unique(listing.items.iter().map(|r| r.cuisine_type.as_str())),
            source: listing.source,
        })
    }

    /// Fetch `path` and mirror the answer. Any failure means the cache is
    /// served instead; only local store errors propagate.
    async fn refresh<T>(&self, path: &str) -> Result<Source, SyncError>
    where
        T: serde::de::DeserializeOwned + IntoRecords,
    {
        let response = match self.api.get(path).await {
            Ok(response) => response,
            Err(e) => {
                warn!("GET {} failed, serving cached data: {}", path, e);
                return Ok(Source::Cache);
            }
        };
        if !response.is_success() {
            warn!(
                "GET {} answered {}, serving cached data",
                path, response.status
            );
            return Ok(Source::Cache);
        }
        let fetched = match response.decode::<T>() {
            Ok(Some(fetched)) => fetched,
            Ok(None) => return Ok(Source::Remote),
            Err(e) => {
                warn!("GET {} returned {}, serving cached data", path, e);
                return Ok(Source::Cache);
            }
        };
        let records = fetched.into_records();
        let written = self.store.mirror(&records).await?;
        debug!("mirrored {} of {} record(s) from {}", written, records.len(), path);
        Ok(Source::Remote)
    }

    /// Every stored entity of a kind, minus those with a queued delete.
    async fn load<E: Entity>(&self, kind: EntityKind) -> Result<Vec<E>, SyncError> {
        let hidden = self.hidden().await?;
        Ok(self
            .store
            .get_all(kind)
            .await?
            .into_iter()
            .filter(|r| !hidden.contains(&(r.kind(), r.id())))
            .filter_map(E::from_record)
            .collect())
    }

    /// Records the user deleted while the delete is still queued. A remote
    /// listing fetched meanwhile may have put them back in the store.
    async fn hidden(&self) -> Result<HashSet<Key>, SyncError> {
        Ok(self
            .store
            .list_pending()
            .await?
            .into_iter()
            .filter(|op| op.method == Method::Delete)
            .map(|op| op.key())
            .collect())
    }
}

/// Remote answers that can be mirrored.
trait IntoRecords {
    fn into_records(self) -> Vec<Record>;
}

impl<E: Entity> IntoRecords for Vec<E> {
    fn into_records(self) -> Vec<Record> {
        self.into_iter().map(Entity::into_record).collect()
    }
}

impl IntoRecords for Restaurant {
    fn into_records(self) -> Vec<Record> {
        vec![self.into_record()]
    }
}

/// Keep restaurants matching both filters; [`ALL`] disables a filter.
pub fn filter_restaurants(
    restaurants: Vec<Restaurant>,
    cuisine: &str,
    neighborhood: &str,
) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|r| cuisine == ALL || r.cuisine_type == cuisine)
        .filter(|r| neighborhood == ALL || r.neighborhood == neighborhood)
        .collect()
}

fn unique<'s>(values: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Page URL of a restaurant, e.g. `./restaurant.html?id=3`.
pub fn url_for_restaurant(restaurant: &Restaurant) -> String {
    restaurant.page_url()
}

/// Image URL of a restaurant, e.g. `/img/3.jpg`.
pub fn image_url_for_restaurant(restaurant: &Restaurant) -> String {
    restaurant.image_url()
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
