// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::BISTRO_API_URL, "BISTRO_API_URL");
    assert_eq!(vars::BISTRO_DB, "BISTRO_DB");
    assert_eq!(vars::BISTRO_CONFIG, "BISTRO_CONFIG");
}

// Each variable is exercised by a single test so parallel tests never race.

#[test]
fn test_api_url() {
    std::env::remove_var("BISTRO_API_URL");
    assert_eq!(api_url(), None);

    std::env::set_var("BISTRO_API_URL", "http://example.test:1337");
    assert_eq!(api_url(), Some("http://example.test:1337".to_string()));

    std::env::set_var("BISTRO_API_URL", "  ");
    assert_eq!(api_url(), None);
    std::env::remove_var("BISTRO_API_URL");
}

#[test]
fn test_db_path() {
    std::env::remove_var("BISTRO_DB");
    assert_eq!(db_path(), None);

    std::env::set_var("BISTRO_DB", "/tmp/bistro-test.db");
    assert_eq!(db_path(), Some(PathBuf::from("/tmp/bistro-test.db")));
    std::env::remove_var("BISTRO_DB");
}

#[test]
fn test_config_path() {
    std::env::remove_var("BISTRO_CONFIG");
    assert_eq!(config_path(), None);

    std::env::set_var("BISTRO_CONFIG", "/tmp/bistro.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/bistro.toml")));

    std::env::set_var("BISTRO_CONFIG", "");
    assert_eq!(config_path(), None);
    std::env::remove_var("BISTRO_CONFIG");
}
