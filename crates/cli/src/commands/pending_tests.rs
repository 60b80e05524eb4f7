// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::TestContext;
use crate::sync::test_helpers::{al_review, Reply};

#[tokio::test]
async fn test_list_empty() {
    let mut ctx = TestContext::offline();
    list(&ctx.rec, OutputFormat::Text, &mut ctx.out).await.unwrap();
    assert_eq!(ctx.output(), "No pending requests.\n");
}

#[tokio::test]
async fn test_list_json() {
    let mut ctx = TestContext::offline();
    ctx.rec.submit_create(al_review()).await;

    list(&ctx.rec, OutputFormat::Json, &mut ctx.out).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&ctx.output()).unwrap();
    let op = &value[0];
    assert_eq!(op["method"], "POST");
    assert_eq!(op["foreignStore"], "reviews");
    assert_eq!(op["foreignKey"], -1);
    assert_eq!(op["body"]["name"], "Al");
}

#[tokio::test]
async fn test_drain_success() {
    let mut ctx = TestContext::offline();
    ctx.rec.submit_create(al_review()).await;
    ctx.api().set_fallback(Reply::created(40));

    drain_with(&ctx.rec, OutputFormat::Text, &CancellationToken::new(), &mut ctx.out)
        .await
        .unwrap();

    assert!(ctx.output().starts_with("Replayed 1, dropped 0, failed 0"));
    assert_eq!(ctx.rec.pending_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_drain_failure_is_an_error() {
    let mut ctx = TestContext::offline();
    ctx.rec.submit_create(al_review()).await;

    let err = drain_with(&ctx.rec, OutputFormat::Text, &CancellationToken::new(), &mut ctx.out)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::DrainIncomplete {
            failed: 1,
            remaining: 1
        }
    ));
    assert!(ctx.output().contains("1 still pending"));
}

#[tokio::test]
async fn test_discard() {
    let mut ctx = TestContext::offline();
    let outcome = ctx.rec.submit_create(al_review()).await;
    let seq = outcome.operation().unwrap().seq;

    discard(&ctx.rec, seq, &mut ctx.out).await.unwrap();

    assert!(ctx.output().starts_with(&format!("Discarded #{seq}")));
    assert_eq!(ctx.rec.pending_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_discard_unknown() {
    let mut ctx = TestContext::offline();
    assert!(discard(&ctx.rec, 42, &mut ctx.out).await.is_err());
}
