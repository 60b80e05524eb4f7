// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::RemoteApi;
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::store::LocalStore;
use crate::sync::Reconciler;
use crate::view::{format_pending_line, render_drain_report, render_pending};

use super::print_json;

pub async fn list<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let ops = rec.list_pending().await?;
    match output {
        OutputFormat::Text => writeln!(out, "{}", render_pending(&ops))?,
        OutputFormat::Json => print_json(out, &ops)?,
    }
    Ok(())
}

/// Replay the queue until done or until Ctrl-C.
pub async fn drain<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping after the current request");
                cancel.cancel();
            }
        }
    });
    let result = drain_with(rec, output, &cancel, out).await;
    watcher.abort();
    result
}

pub(crate) async fn drain_with<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    output: OutputFormat,
    cancel: &CancellationToken,
    out: &mut impl Write,
) -> Result<()> {
    let report = rec.drain_pending_with(cancel).await?;
    match output {
        OutputFormat::Text => writeln!(out, "{}", render_drain_report(&report))?,
        OutputFormat::Json => print_json(out, &report)?,
    }
    if report.failed > 0 {
        return Err(Error::DrainIncomplete {
            failed: report.failed,
            remaining: report.remaining,
        });
    }
    Ok(())
}

pub async fn discard<A: RemoteApi, S: LocalStore>(
    rec: &Reconciler<A, S>,
    seq: i64,
    out: &mut impl Write,
) -> Result<()> {
    let op = rec.discard_pending(seq).await?;
    writeln!(out, "Discarded {}", format_pending_line(&op))?;
    Ok(())
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
