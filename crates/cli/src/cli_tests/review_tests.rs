// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;

#[test]
fn test_review_add() {
    let cli = parse(&[
        "bistro",
        "review",
        "add",
        "--restaurant",
        "3",
        "--name",
        "Al",
        "--rating",
        "5",
        "--comments",
        "Great food, would return",
    ])
    .unwrap();
    match cli.command {
        Command::Review(ReviewCommand::Add { review }) => {
            let payload = review.into_payload();
            assert_eq!(payload.restaurant_id, 3);
            assert_eq!(payload.name, "Al");
            assert_eq!(payload.rating, 5);
            assert_eq!(payload.comments, "Great food, would return");
            assert_eq!(payload.id, None);
        }
        _ => panic!("Expected Review Add command"),
    }
}

#[test]
fn test_review_add_passes_out_of_range_rating_through() {
    // Range checks happen in the reconciler, which reports every field.
    let cli = parse(&[
        "bistro", "review", "add", "-r", "3", "--name", "Al", "--rating", "-1", "--comments", "x",
    ])
    .unwrap();
    match cli.command {
        Command::Review(ReviewCommand::Add { review }) => assert_eq!(review.rating, -1),
        _ => panic!("Expected Review Add command"),
    }
}

#[test]
fn test_review_add_missing_field() {
    let result = parse(&["bistro", "review", "add", "--restaurant", "3", "--name", "Al"]);
    assert!(result.is_err());
}

#[test]
fn test_review_edit_accepts_provisional_id() {
    let cli = parse(&[
        "bistro", "review", "edit", "-2", "-r", "3", "--name", "Al", "--rating", "4", "--comments",
        "Better",
    ])
    .unwrap();
    match cli.command {
        Command::Review(ReviewCommand::Edit { id, review }) => {
            assert_eq!(id, -2);
            assert_eq!(review.rating, 4);
        }
        _ => panic!("Expected Review Edit command"),
    }
}

#[test]
fn test_review_delete() {
    let cli = parse(&["bistro", "review", "delete", "-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Review(ReviewCommand::Delete { id: -1 })
    ));
}
