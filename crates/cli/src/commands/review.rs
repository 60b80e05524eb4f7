// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use bistro_core::{EntityKind, Review};

use crate::api::RemoteApi;
use crate::cli::ReviewArgs;
use crate::error::Result;
use crate::store::LocalStore;
use crate::sync::Reconciler;

use super::report;

fn describe(review: &Review) -> String {
    format!(
        "review {} of restaurant {} ({}/5)",
        review.id, review.restaurant_id, review.rating
    )
}

pub async fn add<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    args: ReviewArgs,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = rec.submit_create(args.into_payload()).await;
    report(out, "Review added", outcome, describe)
}

pub async fn edit<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    id: i64,
    args: ReviewArgs,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = rec.submit_update(args.into_payload().with_id(id)).await;
    report(out, "Review updated", outcome, describe)
}

pub async fn delete<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    id: i64,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = rec.submit_delete(EntityKind::Reviews, id).await;
    report(out, "Review deleted", outcome, |d| format!("review {}", d.id))
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
