//! `hb export` — write a date-stamped backup of the completion log.

use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use habit_core::{DateKey, Store};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Output path (defaults to `cyber_habit_backup_<today>.json` in the
    /// current directory).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Report payload for `hb export`.
#[derive(Debug, Serialize)]
pub struct ExportReport {
    path: PathBuf,
    days: usize,
}

/// Execute `hb export`.
pub fn run_export(
    args: &ExportArgs,
    output: OutputMode,
    store: &Store,
    today: DateKey,
) -> Result<()> {
    let log = store.load()?;
    let days = log.days_logged();
    let path = Store::export_backup(&log, args.output.clone(), today)?;

    let report = ExportReport { path, days };
    render(output, &report, |report, w: &mut dyn Write| {
        writeln!(
            w,
            "✓ Exported {} day{} to {}",
            report.days,
            if report.days == 1 { "" } else { "s" },
            report.path.display()
        )
    })
}
