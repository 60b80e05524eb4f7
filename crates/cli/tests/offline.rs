// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn review_while_offline_is_queued() {
    let ws = Workspace::new();

    ws.bistro()
        .args(["review", "add", "--restaurant", "3", "--name", "Al"])
        .args(["--rating", "5", "--comments", "Great food, would return"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved locally"))
        .stdout(predicate::str::contains("queued POST /reviews"));
}

#[test]
fn pending_list_shows_queued_writes_in_order() {
    let ws = Workspace::new();
    ws.add_review("Al", "5");
    ws.add_review("Bea", "4");

    ws.bistro()
        .args(["pending", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1   POST    /reviews  (reviews -1)"))
        .stdout(predicate::str::contains("#2   POST    /reviews  (reviews -2)"))
        .stdout(predicate::str::contains("Offline: 2 pending requests."));
}

#[test]
fn pending_list_json() {
    let ws = Workspace::new();
    ws.add_review("Al", "5");

    ws.bistro()
        .args(["pending", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"foreignStore\": \"reviews\""))
        .stdout(predicate::str::contains("\"method\": \"POST\""));
}

#[test]
fn invalid_rating_exits_with_field_message() {
    let ws = Workspace::new();

    ws.bistro()
        .args(["review", "add", "--restaurant", "3", "--name", "Al"])
        .args(["--rating", "6", "--comments", "Too good"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: invalid input"))
        .stderr(predicate::str::contains("rating:"));

    ws.bistro()
        .args(["pending", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending requests."));
}

#[test]
fn restaurants_with_empty_cache() {
    let ws = Workspace::new();

    ws.bistro()
        .arg("restaurants")
        .assert()
        .success()
        .stdout(predicate::str::contains("No restaurants found."))
        .stdout(predicate::str::contains("showing cached data"));
}

#[test]
fn drain_while_offline_keeps_queue_and_fails() {
    let ws = Workspace::new();
    ws.add_review("Al", "5");

    ws.bistro()
        .args(["pending", "drain"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 still pending"))
        .stderr(predicate::str::contains("drain incomplete"));

    ws.bistro()
        .args(["pending", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"));
}

#[test]
fn discard_empties_queue() {
    let ws = Workspace::new();
    ws.add_review("Al", "5");

    ws.bistro()
        .args(["pending", "discard", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded #1"));

    ws.bistro()
        .args(["pending", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending requests."));
}

#[test]
fn deleting_unconfirmed_review_needs_no_network() {
    let ws = Workspace::new();
    ws.add_review("Al", "5");

    ws.bistro()
        .args(["review", "delete", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review deleted: review -1"));
}

#[test]
fn show_unknown_restaurant_fails_with_hint() {
    let ws = Workspace::new();

    ws.bistro()
        .args(["show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("restaurant 3 not found"));
}

#[test]
fn bad_api_url_is_a_config_error() {
    let ws = Workspace::new();

    bistro()
        .arg("--config")
        .arg(ws.config())
        .arg("--db")
        .arg(ws.db())
        .args(["--api-url", "localhost:1337", "cuisines"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
}

#[test]
fn missing_explicit_config_fails() {
    let ws = Workspace::new();
    bistro()
        .arg("--db")
        .arg(ws.db())
        .args(["--api-url", UNREACHABLE])
        .args(["--config", "/nonexistent/bistro.toml", "cuisines"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}
