// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use serde::Serialize;

use bistro_core::{Restaurant, Review};

use crate::api::RemoteApi;
use crate::cli::OutputFormat;
use crate::directory::{Directory, Source};
use crate::error::{Error, Result};
use crate::store::LocalStore;
use crate::sync::Reconciler;
use crate::view::render_restaurant;

use super::print_json;

#[derive(Serialize)]
struct RestaurantDetails {
    #[serde(flatten)]
    restaurant: Restaurant,
    reviews: Vec<Review>,
    source: Source,
    pending_count: usize,
}

pub async fn run<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    id: i64,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let directory = Directory::new(rec.api(), rec.store());
    let restaurant = directory
        .restaurant(id)
        .await?
        .ok_or(Error::RestaurantNotFound(id))?;
    let reviews = directory.reviews_for(id).await?;
    let pending_count = rec.pending_count().await?;

    match output {
        OutputFormat::Text => writeln!(
            out,
            "{}",
            render_restaurant(&restaurant, &reviews.items, reviews.source, pending_count)
        )?,
        OutputFormat::Json => print_json(
            out,
            &RestaurantDetails {
                restaurant,
                reviews: reviews.items,
                source: reviews.source,
                pending_count,
            },
        )?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
