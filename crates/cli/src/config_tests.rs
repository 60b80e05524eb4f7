// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn defaults_without_file() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_or_default(&temp.path().join("config.toml"), false).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.api_url, "http://localhost:1337");
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.drain.policy, DrainPolicy::SkipKey);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = Config::load_or_default(&temp.path().join("nope.toml"), true);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn partial_file_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "api_url = \"https://reviews.example.com\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.api_url, "https://reviews.example.com");
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.database, None);
}

#[test]
fn full_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
api_url = "http://10.0.0.2:1337"
database = "/var/lib/bistro/cache.db"
request_timeout_secs = 3

[drain]
policy = "stop"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.db_path(), PathBuf::from("/var/lib/bistro/cache.db"));
    assert_eq!(config.timeout(), Duration::from_secs(3));
    assert_eq!(config.drain.policy, DrainPolicy::Stop);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[drain]\npolicy = \"retry_forever\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.request_timeout_secs = 30;
    config.drain.policy = DrainPolicy::Stop;

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn overrides_replace_only_given_values() {
    let mut config = Config::default();
    config.apply_overrides(None, Some(PathBuf::from("/tmp/b.db")));
    assert_eq!(config.api_url, "http://localhost:1337");
    assert_eq!(config.db_path(), PathBuf::from("/tmp/b.db"));

    config.apply_overrides(Some("https://api.example.com".into()), None);
    assert_eq!(config.api_url, "https://api.example.com");
    assert_eq!(config.db_path(), PathBuf::from("/tmp/b.db"));
}

#[parameterized(
    http = { "http://localhost:1337", true },
    https = { "https://api.example.com", true },
    websocket = { "ws://localhost:1337", false },
    bare_host = { "localhost:1337", false },
    empty = { "", false },
)]
fn api_url_scheme(url: &str, valid: bool) {
    let mut config = Config::default();
    config.api_url = url.to_string();
    assert_eq!(config.validate().is_ok(), valid);
}

#[test]
fn zero_timeout_is_invalid() {
    let mut config = Config::default();
    config.request_timeout_secs = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("request_timeout_secs"));
}

#[test]
fn default_paths_live_under_app_dir() {
    assert!(default_path().ends_with("bistro/config.toml"));
    assert!(default_db_path().ends_with("bistro/bistro.db"));
    assert_eq!(Config::default().db_path(), default_db_path());
}
