// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! View-model and plain-text rendering.
//!
//! [`DirectoryView`] holds what the restaurant list shows: the filtered
//! restaurants, their map markers, the active filters and the number of
//! writes still waiting for the remote. Rendering functions only read it.

use std::fmt;

use serde::Serialize;

use bistro_core::escape::unescape_html;
use bistro_core::{FieldError, PendingOperation, Restaurant, Review};

use crate::directory::{url_for_restaurant, Listing, Source, ALL};
use crate::error::Error;
use crate::sync::{DrainReport, SubmitOutcome, SyncError};

/// Maximum line width for wrapped review comments (excluding indent).
const WRAP_WIDTH: usize = 76;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A map marker for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub url: String,
}

impl Marker {
    pub fn for_restaurant(restaurant: &Restaurant) -> Self {
        Marker {
            title: restaurant.name.clone(),
            lat: restaurant.latlng.lat,
            lng: restaurant.latlng.lng,
            url: url_for_restaurant(restaurant),
        }
    }
}

/// State of the restaurant list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    pub restaurants: Vec<Restaurant>,
    pub markers: Vec<Marker>,
    pub cuisine: String,
    pub neighborhood: String,
    pub pending_count: usize,
    pub source: Source,
}

impl Default for DirectoryView {
    fn default() -> Self {
        DirectoryView::new(ALL, ALL)
    }
}

impl DirectoryView {
    /// An empty view with the given filters.
    pub fn new(cuisine: impl Into<String>, neighborhood: impl Into<String>) -> Self {
        DirectoryView {
            restaurants: Vec::new(),
            markers: Vec::new(),
            cuisine: cuisine.into(),
            neighborhood: neighborhood.into(),
            pending_count: 0,
            source: Source::Remote,
        }
    }

    /// Replaces the restaurants and rebuilds the markers.
    pub fn set_restaurants(&mut self, listing: Listing<Restaurant>) {
        self.markers = listing.items.iter().map(Marker::for_restaurant).collect();
        self.restaurants = listing.items;
        self.source = listing.source;
    }

    pub fn set_pending_count(&mut self, count: usize) {
        self.pending_count = count;
    }

    pub fn pending_notification(&self) -> Option<String> {
        pending_notification(self.pending_count)
    }
}

/// The banner shown while writes are queued.
pub fn pending_notification(count: usize) -> Option<String> {
    (count > 0).then(|| format!("Offline: {count} pending requests."))
}

// ─────────────────────────────────────────────────────────────────────────────
// Restaurants
// ─────────────────────────────────────────────────────────────────────────────

/// Format a restaurant as a single list line.
///
/// Output format: `   3  Roberta's Pizza *  Brooklyn, Pizza`
/// (`*` marks a favorite, `(pending)` a change not yet confirmed).
pub fn format_restaurant_line(restaurant: &Restaurant) -> String {
    let mut line = format!("{:>4}  {}", restaurant.id, restaurant.name);
    if restaurant.is_favorite {
        line.push_str(" *");
    }
    if restaurant.pending {
        line.push_str(" (pending)");
    }
    line.push_str(&format!(
        "  {}, {}",
        restaurant.neighborhood, restaurant.cuisine_type
    ));
    line
}

/// Render the restaurant list.
pub fn render_restaurants(view: &DirectoryView) -> String {
    let mut lines = Vec::new();
    if view.cuisine != ALL || view.neighborhood != ALL {
        lines.push(format!(
            "Cuisine: {}  Neighborhood: {}",
            view.cuisine, view.neighborhood
        ));
    }
    if view.restaurants.is_empty() {
        lines.push("No restaurants found.".to_string());
    }
    lines.extend(view.restaurants.iter().map(format_restaurant_line));
    push_footer(&mut lines, view.source, view.pending_count);
    lines.join("\n")
}

/// Render the detail page of one restaurant with its reviews.
pub fn render_restaurant(
    restaurant: &Restaurant,
    reviews: &[Review],
    source: Source,
    pending_count: usize,
) -> String {
    let mut lines = vec![format_restaurant_line(restaurant).trim_start().to_string()];
    if !restaurant.address.is_empty() {
        lines.push(format!("  Address: {}", restaurant.address));
    }
    lines.push(format!("  Page:    {}", url_for_restaurant(restaurant)));
    lines.push(format!("  Image:   {}", restaurant.image_url()));

    let hours = ordered_hours(restaurant);
    if !hours.is_empty() {
        lines.push(String::new());
        lines.push("Hours:".to_string());
        for (day, hours) in hours {
            lines.push(format!("  {day:<10} {hours}"));
        }
    }

    lines.push(String::new());
    if reviews.is_empty() {
        lines.push("No reviews yet!".to_string());
    } else {
        lines.push(format!("Reviews ({}):", reviews.len()));
        for review in reviews {
            lines.extend(format_review(review));
        }
    }
    push_footer(&mut lines, source, pending_count);
    lines.join("\n")
}

/// Operating hours with weekdays in calendar order, then anything else.
fn ordered_hours(restaurant: &Restaurant) -> Vec<(&str, &str)> {
    let hours = &restaurant.operating_hours;
    let mut ordered: Vec<(&str, &str)> = WEEKDAYS
        .iter()
        .filter_map(|day| hours.get(*day).map(|h| (*day, h.as_str())))
        .collect();
    ordered.extend(
        hours
            .iter()
            .filter(|(day, _)| !WEEKDAYS.contains(&day.as_str()))
            .map(|(day, h)| (day.as_str(), h.as_str())),
    );
    ordered
}

/// Format a review as a header line plus indented, wrapped comments.
pub fn format_review(review: &Review) -> Vec<String> {
    let mut header = format!("  {}  {}/5", unescape_html(&review.name), review.rating);
    if let Some(created) = review.created_at {
        header.push_str(&format!("  {}", created.format("%B %-d, %Y")));
    }
    if review.pending {
        header.push_str("  (pending)");
    }

    let mut lines = vec![header];
    for line in wrap_text(&unescape_html(&review.comments), WRAP_WIDTH).lines() {
        lines.push(format!("    {line}"));
    }
    lines
}

/// Wrap text at word boundaries if it's a single line.
///
/// Text that already contains newlines is returned unchanged.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.chars().count() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

fn push_footer(lines: &mut Vec<String>, source: Source, pending_count: usize) {
    if source == Source::Cache {
        lines.push(String::new());
        lines.push("(remote unreachable, showing cached data)".to_string());
    }
    if let Some(note) = pending_notification(pending_count) {
        lines.push(String::new());
        lines.push(note);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pending queue
// ─────────────────────────────────────────────────────────────────────────────

/// Format a queued operation as a single line.
///
/// Output format: `#4  POST    /reviews  (reviews -1)  2024-01-10 12:00`
pub fn format_pending_line(op: &PendingOperation) -> String {
    format!(
        "#{:<3} {:<7} {}  ({} {})  {}",
        op.seq,
        op.method.as_str(),
        op.url,
        op.foreign_store,
        op.foreign_key,
        op.created_at.format("%Y-%m-%d %H:%M")
    )
}

pub fn render_pending(ops: &[PendingOperation]) -> String {
    if ops.is_empty() {
        return "No pending requests.".to_string();
    }
    let mut lines: Vec<String> = ops.iter().map(format_pending_line).collect();
    lines.push(String::new());
    lines.push(pending_notification(ops.len()).unwrap_or_default());
    lines.join("\n")
}

pub fn render_drain_report(report: &DrainReport) -> String {
    let mut line = format!(
        "Replayed {}, dropped {}, failed {}, blocked {}; {} still pending.",
        report.replayed, report.dropped, report.failed, report.blocked, report.remaining
    );
    if report.cancelled {
        line.push_str(" Drain was interrupted.");
    } else if report.stopped {
        line.push_str(" Drain stopped at the first failure.");
    }
    line
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcomes and errors
// ─────────────────────────────────────────────────────────────────────────────

/// Render the result of a write. `describe` names the affected entity.
pub fn render_outcome<E>(
    action: &str,
    outcome: &SubmitOutcome<E>,
    describe: impl Fn(&E) -> String,
) -> String {
    match outcome {
        SubmitOutcome::Synced(entity) => format!("{action}: {}", describe(entity)),
        SubmitOutcome::Pending {
            entity,
            operation,
            cause,
        } => format!(
            "{action} saved locally: {}\n  queued {} {} as #{} ({cause})",
            describe(entity),
            operation.method,
            operation.url,
            operation.seq
        ),
        SubmitOutcome::Failed(e) => render_sync_error(e),
    }
}

/// One line per invalid field, e.g. `  rating: must be between 1 and 5`.
pub fn field_messages(errors: &[FieldError]) -> Vec<String> {
    errors
        .iter()
        .map(|e| format!("  {}: {}", e.field, e.message))
        .collect()
}

/// Render an error for stderr.
pub fn render_error(err: &Error) -> String {
    render_message(err, err.field_errors())
}

pub fn render_sync_error(err: &SyncError) -> String {
    render_message(err, err.field_errors())
}

fn render_message(err: &dyn fmt::Display, fields: &[FieldError]) -> String {
    if fields.is_empty() {
        return format!("error: {err}");
    }
    let mut lines = vec!["error: invalid input".to_string()];
    lines.extend(field_messages(fields));
    lines.join("\n")
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
