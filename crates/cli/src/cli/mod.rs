// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::{FilterArgs, GlobalArgs, ReviewArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bistro")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first restaurant directory and reviews")]
#[command(
    long_about = "Offline-first restaurant directory and reviews.\n\n\
    Browse restaurants and write reviews. Writes that cannot reach the service \
    are queued locally and replayed with 'bistro pending drain'."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Browsing
    // ─────────────────────────────────────────────────────────────────────────
    /// List restaurants
    #[command(after_help = "\
Examples:
  bistro restaurants                          All restaurants
  bistro restaurants --cuisine Pizza          Pizza places only
  bistro restaurants -n Brooklyn --favorites  Favorites in Brooklyn")]
    Restaurants {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show only favorites
        #[arg(long)]
        favorites: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a restaurant with its opening hours and reviews
    Show {
        /// Restaurant id
        id: i64,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the neighborhoods restaurants are in
    Neighborhoods,

    /// List the cuisines restaurants serve
    Cuisines,

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────
    /// Add, edit, or delete reviews
    #[command(subcommand)]
    Review(ReviewCommand),

    /// Mark a restaurant as favorite (or unmark it with --off)
    #[command(after_help = "\
Examples:
  bistro favorite 3          Mark restaurant 3 as favorite
  bistro favorite 3 --off    Unmark it")]
    Favorite {
        /// Restaurant id
        id: i64,

        /// Remove the favorite mark instead
        #[arg(long)]
        off: bool,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Queue
    // ─────────────────────────────────────────────────────────────────────────
    /// Inspect and replay writes waiting for the service
    #[command(subcommand)]
    Pending(PendingCommand),
}

/// Review commands.
#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// Write a new review
    #[command(after_help = "\
Examples:
  bistro review add --restaurant 3 --name Al --rating 5 --comments \"Great food\"")]
    Add {
        #[command(flatten)]
        review: ReviewArgs,
    },

    /// Replace an existing review
    #[command(allow_negative_numbers = true)]
    Edit {
        /// Review id (negative for reviews not yet confirmed)
        id: i64,

        #[command(flatten)]
        review: ReviewArgs,
    },

    /// Delete a review
    #[command(allow_negative_numbers = true)]
    Delete {
        /// Review id (negative for reviews not yet confirmed)
        id: i64,
    },
}

/// Pending queue commands.
#[derive(Subcommand, Debug)]
pub enum PendingCommand {
    /// List queued writes in replay order
    List {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Replay queued writes against the service
    #[command(after_help = "\
Exits with status 1 when entries fail and stay queued.
Ctrl-C stops after the write in flight.")]
    Drain {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Drop a queued write without replaying it
    Discard {
        /// Sequence number shown by 'bistro pending list'
        seq: i64,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
