// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;

#[test]
fn test_restaurants_defaults() {
    let cli = parse(&["bistro", "restaurants"]).unwrap();
    match cli.command {
        Command::Restaurants {
            filter,
            favorites,
            output,
        } => {
            assert_eq!(filter.cuisine, "all");
            assert_eq!(filter.neighborhood, "all");
            assert!(!favorites);
            assert_eq!(output, OutputFormat::Text);
        }
        _ => panic!("Expected Restaurants command"),
    }
}

#[test]
fn test_restaurants_with_filters() {
    let cli = parse(&[
        "bistro",
        "restaurants",
        "-c",
        "Pizza",
        "--neighborhood",
        "Brooklyn",
        "--favorites",
        "-o",
        "json",
    ])
    .unwrap();
    match cli.command {
        Command::Restaurants {
            filter,
            favorites,
            output,
        } => {
            assert_eq!(filter.cuisine, "Pizza");
            assert_eq!(filter.neighborhood, "Brooklyn");
            assert!(favorites);
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("Expected Restaurants command"),
    }
}

#[test]
fn test_restaurants_rejects_blank_filter() {
    assert!(parse(&["bistro", "restaurants", "--cuisine", "  "]).is_err());
}

#[test]
fn test_show_requires_numeric_id() {
    let cli = parse(&["bistro", "show", "3"]).unwrap();
    assert!(matches!(cli.command, Command::Show { id: 3, .. }));
    assert!(parse(&["bistro", "show", "three"]).is_err());
    assert!(parse(&["bistro", "show"]).is_err());
}

#[test]
fn test_listing_commands() {
    assert!(matches!(
        parse(&["bistro", "neighborhoods"]).unwrap().command,
        Command::Neighborhoods
    ));
    assert!(matches!(
        parse(&["bistro", "cuisines"]).unwrap().command,
        Command::Cuisines
    ));
}

#[test]
fn test_favorite_on_and_off() {
    let on = parse(&["bistro", "favorite", "3"]).unwrap();
    assert!(matches!(on.command, Command::Favorite { id: 3, off: false }));

    let off = parse(&["bistro", "favorite", "3", "--off"]).unwrap();
    assert!(matches!(off.command, Command::Favorite { id: 3, off: true }));
}
