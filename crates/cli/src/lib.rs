// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bistro - an offline-first restaurant directory and review client.
//!
//! This crate provides the functionality behind the `bistro` CLI: reads are
//! served from the remote service and mirrored into a local SQLite store,
//! and writes are applied locally first, then confirmed remotely or queued
//! for replay when the service cannot be reached.
//!
//! # Main Components
//!
//! - [`Reconciler`] - applies writes and replays the pending queue
//! - [`Directory`] - restaurant and review lookups with offline fallback
//! - [`RemoteApi`] / [`HttpApi`] - the remote service
//! - [`LocalStore`] / [`SqliteStore`] - the local store and queue
//! - [`Config`] - client configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use bistro::{HttpApi, Reconciler, SqliteStore};
//! use bistro_core::ReviewPayload;
//!
//! let api = HttpApi::new("http://localhost:1337", Duration::from_secs(10))?;
//! let store = SqliteStore::open(Path::new("bistro.db"))?;
//! let reconciler = Reconciler::new(api, store);
//!
//! let outcome = reconciler
//!     .submit_create(ReviewPayload::new(3, "Al", 5, "Great food, would return"))
//!     .await;
//! // Synced, Pending (queued for `drain_pending`), or Failed
//! ```

mod cli;
mod commands;
mod env;

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod store;
pub mod sync;
pub mod view;

pub use api::{HttpApi, RemoteApi};
pub use cli::{
    Cli, Command, FilterArgs, GlobalArgs, OutputFormat, PendingCommand, ReviewArgs,
    ReviewCommand,
};
pub use config::Config;
pub use directory::Directory;
pub use error::{Error, Result};
pub use store::{LocalStore, SqliteStore};
pub use sync::{Reconciler, SubmitOutcome, SyncError};

/// Resolve configuration: flag, then environment, then file, then defaults.
pub fn resolve_config(global: &GlobalArgs) -> Result<Config> {
    let (path, explicit) = match global.config.clone().or_else(env::config_path) {
        Some(path) => (path, true),
        None => (config::default_path(), false),
    };
    let mut config = Config::load_or_default(&path, explicit)?;
    config.apply_overrides(env::api_url(), env::db_path());
    config.apply_overrides(global.api_url.clone(), global.db.clone());
    config.validate()?;
    Ok(config)
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.global)?;
    let client = commands::open(&config)?;
    let mut out = std::io::stdout();

    match cli.command {
        Command::Restaurants {
            filter,
            favorites,
            output,
        } => commands::restaurants::run(&client, &filter, favorites, output, &mut out).await,
        Command::Show { id, output } => commands::show::run(&client, id, output, &mut out).await,
        Command::Neighborhoods => commands::restaurants::neighborhoods(&client, &mut out).await,
        Command::Cuisines => commands::restaurants::cuisines(&client, &mut out).await,
        Command::Review(cmd) => match cmd {
            ReviewCommand::Add { review } => commands::review::add(&client, review, &mut out).await,
            ReviewCommand::Edit { id, review } => {
                commands::review::edit(&client, id, review, &mut out).await
            }
            ReviewCommand::Delete { id } => commands::review::delete(&client, id, &mut out).await,
        },
        Command::Favorite { id, off } => {
            commands::favorite::run(&client, id, !off, &mut out).await
        }
        Command::Pending(cmd) => match cmd {
            PendingCommand::List { output } => {
                commands::pending::list(&client, output, &mut out).await
            }
            PendingCommand::Drain { output } => {
                commands::pending::drain(&client, output, &mut out).await
            }
            PendingCommand::Discard { seq } => {
                commands::pending::discard(&client, seq, &mut out).await
            }
        },
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
