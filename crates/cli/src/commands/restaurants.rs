// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::api::RemoteApi;
use crate::cli::{FilterArgs, OutputFormat};
use crate::directory::{filter_restaurants, Directory, Listing};
use crate::error::Result;
use crate::store::LocalStore;
use crate::sync::Reconciler;
use crate::view::{render_restaurants, DirectoryView};

use super::print_json;

pub async fn run<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    filter: &FilterArgs,
    favorites: bool,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let directory = Directory::new(rec.api(), rec.store());
    let listing = if favorites {
        directory.favorites().await?
    } else {
        directory.restaurants().await?
    };

    let mut view = DirectoryView::new(filter.cuisine.as_str(), filter.neighborhood.as_str());
    view.set_restaurants(Listing {
        items: filter_restaurants(listing.items, &filter.cuisine, &filter.neighborhood),
        source: listing.source,
    });
    view.set_pending_count(rec.pending_count().await?);

    match output {
        OutputFormat::Text => writeln!(out, "{}", render_restaurants(&view))?,
        OutputFormat::Json => print_json(out, &view)?,
    }
    Ok(())
}

pub async fn neighborhoods<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    out: &mut impl Write,
) -> Result<()> {
    let listing = Directory::new(rec.api(), rec.store())
        .neighborhoods()
        .await?;
    print_values(out, &listing)
}

pub async fn cuisines<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    out: &mut impl Write,
) -> Result<()> {
    let listing = Directory::new(rec.api(), rec.store()).cuisines().await?;
    print_values(out, &listing)
}

fn print_values(out: &mut impl Write, listing: &Listing<String>) -> Result<()> {
    for value in &listing.items {
        writeln!(out, "{value}")?;
    }
    if listing.is_cached() {
        writeln!(out, "(remote unreachable, showing cached data)")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "restaurants_tests.rs"]
mod tests;
