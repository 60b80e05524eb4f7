// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::api::RemoteApi;
use crate::directory::Directory;
use crate::error::{Error, Result};
use crate::store::LocalStore;
use crate::sync::Reconciler;

use super::report;

pub async fn run<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    id: i64,
    favorite: bool,
    out: &mut impl Write,
) -> Result<()> {
    // The restaurant must be known locally before it can be marked.
    Directory::new(rec.api(), rec.store())
        .restaurant(id)
        .await?
        .ok_or(Error::RestaurantNotFound(id))?;

    let outcome = rec.set_favorite(id, favorite).await;
    let action = if favorite {
        "Marked as favorite"
    } else {
        "Removed from favorites"
    };
    report(out, action, outcome, |r| r.name.clone())
}

#[cfg(test)]
#[path = "favorite_tests.rs"]
mod tests;
