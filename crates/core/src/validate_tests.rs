// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    zero = { 0, false },
    one = { 1, true },
    three = { 3, true },
    five = { 5, true },
    six = { 6, false },
    negative = { -1, false },
)]
fn rating_bounds(rating: i64, ok: bool) {
    assert_eq!(validate_rating(rating).is_ok(), ok);
}

#[parameterized(
    simple = { "Al", true },
    mixed_case = { "McDonald", true },
    empty = { "", false },
    space = { "Al Smith", false },
    digit = { "Al2", false },
    accent = { "Zoë", false },
    markup = { "<b>", false },
)]
fn name_letters_only(name: &str, ok: bool) {
    assert_eq!(validate_name(name).is_ok(), ok);
}

#[test]
fn comments_length_bounds() {
    assert!(validate_comments("").is_err());
    assert!(validate_comments("x").is_ok());
    assert!(validate_comments(&"x".repeat(140)).is_ok());
    assert!(validate_comments(&"x".repeat(141)).is_err());
}

#[test]
fn comments_counted_in_characters() {
    // 140 two-byte characters are still 140 characters.
    assert!(validate_comments(&"é".repeat(140)).is_ok());
}

#[test]
fn id_must_be_positive() {
    assert!(validate_id("restaurant_id", 1).is_ok());
    let err = validate_id("restaurant_id", 0).unwrap_err();
    assert_eq!(err.field, "restaurant_id");
    assert!(validate_id("restaurant_id", -4).is_err());
}

#[test]
fn finish_collects_errors() {
    assert!(finish(Vec::new()).is_ok());
    let err = finish(vec![FieldError::new("name", "bad")]).unwrap_err();
    assert_eq!(err.field_errors().len(), 1);
}
