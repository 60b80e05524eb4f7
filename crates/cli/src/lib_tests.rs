// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Tests for configuration resolution.
//!
//! Every test passes `--config`, `--api-url` and `--db` explicitly so that
//! the `BISTRO_*` environment (exercised in env_tests) never leaks in.
//! Command routing is covered by the integration tests, which run the binary.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::sync::DrainPolicy;
use crate::{resolve_config, Error, GlobalArgs};

fn args(config: PathBuf, api_url: &str) -> GlobalArgs {
    GlobalArgs {
        config: Some(config),
        api_url: Some(api_url.to_string()),
        db: Some(PathBuf::from("/tmp/flag.db")),
        verbose: false,
    }
}

#[test]
fn test_flags_override_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        "api_url = \"http://file.example:1337\"\ndatabase = \"/tmp/file.db\"\n\
         request_timeout_secs = 4\n[drain]\npolicy = \"stop\"\n",
    )
    .unwrap();

    let config = resolve_config(&args(path, "https://flag.example")).unwrap();

    assert_eq!(config.api_url, "https://flag.example");
    assert_eq!(config.db_path(), PathBuf::from("/tmp/flag.db"));
    assert_eq!(config.request_timeout_secs, 4);
    assert_eq!(config.drain.policy, DrainPolicy::Stop);
}

#[test]
fn test_explicit_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    let result = resolve_config(&args(temp.path().join("missing.toml"), "http://x"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_flag_url_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let result = resolve_config(&args(path, "ftp://example.com"));
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("ftp://")));
}
