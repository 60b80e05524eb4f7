// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from a TOML file (by default
//! `<config dir>/bistro/config.toml`). Every field has a default, so a
//! missing default file is not an error. Values resolve in this order:
//! command-line flag, environment variable, config file, default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::sync::DrainPolicy;

const APP_DIR_NAME: &str = "bistro";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "bistro.db";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the restaurant/review service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path of the local database. Defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    /// Timeout for a single remote request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub drain: DrainConfig,
}

/// How the pending queue is replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainConfig {
    /// What to do when a replay fails (default: `skip_key`).
    #[serde(default)]
    pub policy: DrainPolicy,
}

fn default_api_url() -> String {
    "http://localhost:1337".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            database: None,
            request_timeout_secs: default_request_timeout_secs(),
            drain: DrainConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Loads configuration, treating a missing file as all defaults.
    ///
    /// With `explicit` set, the file was named by the user and must exist.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            return Ok(Config::default());
        }
        Config::load(path)
    }

    /// Applies overrides from flags or environment; `None` keeps the value.
    pub fn apply_overrides(&mut self, api_url: Option<String>, database: Option<PathBuf>) {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(path) = database {
            self.database = Some(path);
        }
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_url '{}' must start with http:// or https://",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The database path, falling back to the user data directory.
    pub fn db_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_db_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Saves configuration to the given file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Default location of the config file.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Default location of the local database.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
