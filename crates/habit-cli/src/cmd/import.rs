//! `hb import` — restore the completion log from a backup file.
//!
//! Import is a full replace: the previous log is discarded, not merged.
//! Any parse or shape failure leaves the existing history untouched.

use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use habit_core::{HabitError, Store};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Backup file to restore from.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Report payload for `hb import`.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    path: PathBuf,
    imported_days: usize,
    skipped_entries: usize,
    skipped_values: usize,
}

/// Execute `hb import`.
pub fn run_import(args: &ImportArgs, output: OutputMode, store: &Store) -> Result<()> {
    if !store.data_dir().exists() {
        return Err(HabitError::NotInitialized {
            path: store.data_dir().to_path_buf(),
        }
        .into());
    }

    let (log, adoption) = Store::read_backup(&args.file)?;
    store.save(&log)?;

    let report = ImportReport {
        path: args.file.clone(),
        imported_days: adoption.adopted_days,
        skipped_entries: adoption.skipped_entries,
        skipped_values: adoption.skipped_values,
    };
    render(output, &report, render_import_human)
}

fn render_import_human(report: &ImportReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "✓ Imported {} day{} from {}",
        report.imported_days,
        if report.imported_days == 1 { "" } else { "s" },
        report.path.display()
    )?;
    if report.skipped_entries > 0 || report.skipped_values > 0 {
        writeln!(
            w,
            "  skipped {} malformed entr{} and {} malformed task id{}",
            report.skipped_entries,
            if report.skipped_entries == 1 { "y" } else { "ies" },
            report.skipped_values,
            if report.skipped_values == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}
