// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod favorite;
pub mod pending;
pub mod restaurants;
pub mod review;
pub mod show;

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::api::HttpApi;
use crate::config::Config;
use crate::error::Result;
use crate::store::SqliteStore;
use crate::sync::{Reconciler, SubmitOutcome};
use crate::view::render_outcome;

/// The reconciler the commands run against.
pub type Client = Reconciler<HttpApi, SqliteStore>;

/// Build the client from resolved configuration.
pub fn open(config: &Config) -> Result<Client> {
    let db_path = config.db_path();
    debug!("api {} db {}", config.api_url, db_path.display());
    let api = HttpApi::new(&config.api_url, config.timeout())?;
    let store = SqliteStore::open(&db_path)?;
    Ok(Reconciler::new(api, store).with_policy(config.drain.policy))
}

/// Print a write outcome, or turn a failure into the command's error.
pub fn report<E>(
    out: &mut impl Write,
    action: &str,
    outcome: SubmitOutcome<E>,
    describe: impl Fn(&E) -> String,
) -> Result<()> {
    if let SubmitOutcome::Failed(e) = outcome {
        return Err(e.into());
    }
    writeln!(out, "{}", render_outcome(action, &outcome, describe))?;
    Ok(())
}

pub fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
