// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::TestContext;
use crate::sync::test_helpers::al_review;

#[tokio::test]
async fn test_show_offline_includes_unconfirmed_review() {
    let mut ctx = TestContext::offline();
    ctx.seed_restaurant(3, "Roberta's Pizza").await;
    ctx.rec.submit_create(al_review()).await;

    run(&ctx.rec, 3, OutputFormat::Text, &mut ctx.out)
        .await
        .unwrap();

    let out = ctx.output();
    assert!(out.starts_with("3  Roberta's Pizza"));
    assert!(out.contains("Al  5/5"));
    assert!(out.contains("(pending)"));
    assert!(out.contains("Great food, would return"));
    assert!(out.contains("Offline: 1 pending requests."));
}

#[tokio::test]
async fn test_show_unknown_restaurant() {
    let mut ctx = TestContext::offline();
    let err = run(&ctx.rec, 99, OutputFormat::Text, &mut ctx.out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RestaurantNotFound(99)));
    assert!(ctx.output().is_empty());
}

#[tokio::test]
async fn test_show_json() {
    let mut ctx = TestContext::offline();
    ctx.seed_restaurant(3, "Roberta's Pizza").await;

    run(&ctx.rec, 3, OutputFormat::Json, &mut ctx.out)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&ctx.output()).unwrap();
    assert_eq!(value["id"], 3);
    assert_eq!(value["name"], "Roberta's Pizza");
    assert_eq!(value["reviews"], serde_json::json!([]));
    assert_eq!(value["source"], "cache");
}
