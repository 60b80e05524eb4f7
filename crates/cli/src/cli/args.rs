// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` to reduce duplication
//! across commands that take the same options.

use std::path::PathBuf;

use clap::Args;

use bistro_core::ReviewPayload;

use super::non_empty_string;

/// Options accepted by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/bistro/config.toml)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Base URL of the restaurant service
    #[arg(long, global = true, value_name = "url")]
    pub api_url: Option<String>,

    /// Local database file
    #[arg(long, global = true, value_name = "path")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Cuisine and neighborhood filters; `all` disables a filter.
#[derive(Args, Clone, Debug)]
pub struct FilterArgs {
    /// Filter by cuisine
    #[arg(long, short, default_value = "all", value_parser = non_empty_string)]
    pub cuisine: String,

    /// Filter by neighborhood
    #[arg(long, short, default_value = "all", value_parser = non_empty_string)]
    pub neighborhood: String,
}

/// The fields of a review.
///
/// Values are passed through unchecked; the reconciler validates them so
/// that every invalid field is reported at once.
#[derive(Args, Clone, Debug)]
pub struct ReviewArgs {
    /// Restaurant being reviewed
    #[arg(long, short, allow_negative_numbers = true)]
    pub restaurant: i64,

    /// Reviewer name (letters only)
    #[arg(long)]
    pub name: String,

    /// Rating from 1 to 5
    #[arg(long, allow_negative_numbers = true)]
    pub rating: i64,

    /// Review text (up to 140 characters)
    #[arg(long)]
    pub comments: String,
}

impl ReviewArgs {
    pub fn into_payload(self) -> ReviewPayload {
        ReviewPayload::new(self.restaurant, self.name, self.rating, self.comments)
    }
}
