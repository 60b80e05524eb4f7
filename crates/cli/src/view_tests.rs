// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::sync::test_helpers::restaurant;
use crate::sync::PendingCause;
use bistro_core::{EntityKind, LatLng, Method};
use chrono::{TimeZone, Utc};

fn test_review(id: i64, pending: bool) -> Review {
    Review {
        id,
        restaurant_id: 3,
        name: "Al".to_string(),
        rating: 5,
        comments: "Great food, would return".to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()),
        updated_at: None,
        pending,
    }
}

fn test_op(seq: i64) -> PendingOperation {
    PendingOperation {
        seq,
        foreign_key: -1,
        foreign_store: EntityKind::Reviews,
        method: Method::Post,
        url: "/reviews".to_string(),
        body: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    }
}

// view-model tests
#[test]
fn test_notification_only_when_pending() {
    assert_eq!(pending_notification(0), None);
    assert_eq!(
        pending_notification(2).as_deref(),
        Some("Offline: 2 pending requests.")
    );
}

#[test]
fn test_set_restaurants_builds_markers() {
    let mut r = restaurant(3, "Roberta's Pizza", "Brooklyn", "Pizza");
    r.latlng = LatLng {
        lat: 40.705,
        lng: -73.934,
    };
    let mut view = DirectoryView::default();
    view.set_restaurants(Listing {
        items: vec![r],
        source: Source::Cache,
    });

    assert_eq!(
        view.markers,
        vec![Marker {
            title: "Roberta's Pizza".to_string(),
            lat: 40.705,
            lng: -73.934,
            url: "./restaurant.html?id=3".to_string(),
        }]
    );
    assert_eq!(view.source, Source::Cache);
}

#[test]
fn test_render_restaurants_with_footer() {
    let mut fav = restaurant(1, "Emily", "Brooklyn", "Pizza");
    fav.is_favorite = true;
    let mut view = DirectoryView::new("Pizza", ALL);
    view.set_restaurants(Listing {
        items: vec![fav],
        source: Source::Cache,
    });
    view.set_pending_count(1);

    let out = render_restaurants(&view);
    assert!(out.starts_with("Cuisine: Pizza  Neighborhood: all"));
    assert!(out.contains("   1  Emily *  Brooklyn, Pizza"));
    assert!(out.contains("showing cached data"));
    assert!(out.ends_with("Offline: 1 pending requests."));
}

#[test]
fn test_render_empty_list() {
    let out = render_restaurants(&DirectoryView::default());
    assert_eq!(out, "No restaurants found.");
}

// detail tests
#[test]
fn test_render_restaurant_orders_hours_and_marks_pending_review() {
    let mut r = restaurant(3, "Roberta's Pizza", "Brooklyn", "Pizza");
    r.address = "261 Moore St".to_string();
    r.operating_hours
        .insert("Sunday".to_string(), "11:00 am - 12:00 am".to_string());
    r.operating_hours
        .insert("Monday".to_string(), "5:00 pm - 10:00 pm".to_string());

    let out = render_restaurant(&r, &[test_review(-1, true)], Source::Remote, 0);

    let monday = out.find("Monday").unwrap();
    let sunday = out.find("Sunday").unwrap();
    assert!(monday < sunday);
    assert!(out.contains("Address: 261 Moore St"));
    assert!(out.contains("Image:   /img/3.jpg"));
    assert!(out.contains("Al  5/5  January 10, 2024  (pending)"));
    assert!(!out.contains("Offline:"));
}

#[test]
fn test_render_restaurant_without_reviews() {
    let r = restaurant(3, "Roberta's Pizza", "Brooklyn", "Pizza");
    let out = render_restaurant(&r, &[], Source::Remote, 0);
    assert!(out.contains("No reviews yet!"));
}

#[test]
fn test_format_review_unescapes_text() {
    let mut review = test_review(4, false);
    review.comments = "fish &amp; chips &lt;3".to_string();
    let lines = format_review(&review);
    assert_eq!(lines[1], "    fish & chips <3");
}

#[test]
fn test_wrap_text_long_line() {
    let wrapped = wrap_text("one two three four", 9);
    assert_eq!(wrapped, "one two\nthree\nfour");
}

#[test]
fn test_wrap_text_keeps_multiline() {
    assert_eq!(wrap_text("a\nb", 1), "a\nb");
}

// queue tests
#[test]
fn test_render_pending() {
    let out = render_pending(&[test_op(1), test_op(2)]);
    assert!(out.contains("#1   POST    /reviews  (reviews -1)  2024-01-10 12:00"));
    assert!(out.ends_with("Offline: 2 pending requests."));
    assert_eq!(render_pending(&[]), "No pending requests.");
}

#[test]
fn test_render_drain_report() {
    let report = DrainReport {
        replayed: 2,
        failed: 1,
        remaining: 1,
        stopped: true,
        ..DrainReport::default()
    };
    let out = render_drain_report(&report);
    assert!(out.starts_with("Replayed 2, dropped 0, failed 1, blocked 0; 1 still pending."));
    assert!(out.contains("stopped"));
}

// outcome tests
#[test]
fn test_render_pending_outcome() {
    let outcome = SubmitOutcome::Pending {
        entity: test_review(-1, true),
        operation: test_op(7),
        cause: PendingCause::Rejected { status: 500 },
    };
    let out = render_outcome("review added", &outcome, |r| format!("review {}", r.id));
    assert!(out.starts_with("review added saved locally: review -1"));
    assert!(out.contains("queued POST /reviews as #7"));
}

#[test]
fn test_render_failed_outcome_lists_fields() {
    let outcome: SubmitOutcome<Review> = SubmitOutcome::Failed(SyncError::InvalidInput(vec![
        FieldError::new("rating", "must be between 1 and 5"),
        FieldError::new("name", "must contain only letters"),
    ]));
    let out = render_outcome("review added", &outcome, |r| r.id.to_string());
    assert_eq!(
        out,
        "error: invalid input\n  rating: must be between 1 and 5\n  name: must contain only letters"
    );
}

#[test]
fn test_render_error_plain() {
    let err = Error::Config("bad".to_string());
    assert_eq!(render_error(&err), "error: config error: bad");
}
