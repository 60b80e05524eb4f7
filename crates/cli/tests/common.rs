// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A port nothing listens on, so every remote call fails fast.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// `bistro` with none of its environment overrides set.
pub fn bistro() -> Command {
    let mut cmd = cargo_bin_cmd!("bistro");
    cmd.env_remove("BISTRO_API_URL")
        .env_remove("BISTRO_DB")
        .env_remove("BISTRO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp workspace with its own database and config file.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "request_timeout_secs = 2\n").unwrap();
        Workspace { temp }
    }

    pub fn db(&self) -> PathBuf {
        self.temp.path().join("bistro.db")
    }

    pub fn config(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    /// `bistro` pointed at this workspace and an unreachable service.
    pub fn bistro(&self) -> Command {
        let mut cmd = bistro();
        cmd.arg("--config")
            .arg(self.config())
            .arg("--db")
            .arg(self.db())
            .arg("--api-url")
            .arg(UNREACHABLE);
        cmd
    }

    /// Queue a review for restaurant 3 while offline.
    pub fn add_review(&self, name: &str, rating: &str) {
        self.bistro()
            .args(["review", "add", "--restaurant", "3", "--name", name])
            .args(["--rating", rating, "--comments", "Great food, would return"])
            .assert()
            .success();
    }
}
