//! `hb toggle` — flip one task's completion for a day.

use crate::cmd::resolve_date;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use habit_core::stats::{DayStats, day_stats};
use habit_core::{DateKey, Store, config};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Task id to toggle (see `hb tasks`).
    #[arg(value_name = "TASK_ID")]
    pub task_id: String,

    /// Day to toggle on (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

/// Report payload for `hb toggle`.
#[derive(Debug, Serialize)]
pub struct ToggleReport {
    task_id: String,
    date: DateKey,
    done: bool,
    /// Whether the id exists in the catalog (unknown ids are tolerated).
    in_catalog: bool,
    #[serde(flatten)]
    day: DayStats,
}

/// Execute `hb toggle`.
pub fn run_toggle(
    args: &ToggleArgs,
    output: OutputMode,
    store: &Store,
    today: DateKey,
) -> Result<()> {
    let date = resolve_date(args.date.as_deref(), today)?;
    let (catalog, _levels) = config::load(store.data_dir())?;

    let in_catalog = catalog.contains(&args.task_id);
    if !in_catalog {
        warn!(task_id = %args.task_id, "toggling id not present in the catalog");
    }

    let log = store.load()?;
    let next = log.toggle(date, &args.task_id);
    let done = next.is_completed(date, &args.task_id);

    // Persistence after a toggle is best-effort: the mutation is reported
    // either way and the user can retry.
    if let Err(err) = store.save(&next) {
        warn!(error = %err, "failed to persist history");
        if !output.is_json() {
            eprintln!("warning: history not saved: {err}");
        }
    }

    let report = ToggleReport {
        task_id: args.task_id.clone(),
        date,
        done,
        in_catalog,
        day: day_stats(&next, date, catalog.total_tasks()),
    };

    render(output, &report, render_toggle_human)
}

fn render_toggle_human(report: &ToggleReport, w: &mut dyn Write) -> std::io::Result<()> {
    let (mark, verb) = if report.done {
        ("✓", "completed")
    } else {
        ("✗", "cleared")
    };
    writeln!(w, "{mark} {} {verb} for {}", report.task_id, report.date)?;
    if !report.in_catalog {
        writeln!(w, "  note: '{}' is not in the catalog", report.task_id)?;
    }
    writeln!(
        w,
        "Day: {}/{} ({}%){}",
        report.day.completed,
        report.day.total,
        report.day.percentage,
        if report.day.perfect { "  ★ perfect" } else { "" }
    )
}
