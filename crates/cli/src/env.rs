// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule. Empty values count as unset.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `BISTRO_API_URL` if set.
pub fn api_url() -> Option<String> {
    non_empty(vars::BISTRO_API_URL)
}

/// Returns the value of `BISTRO_DB` if set.
pub fn db_path() -> Option<PathBuf> {
    non_empty(vars::BISTRO_DB).map(PathBuf::from)
}

/// Returns the value of `BISTRO_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::BISTRO_CONFIG).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
