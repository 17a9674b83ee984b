//! `hb day` — one day's checklist with completion marks and progress.

use crate::cmd::resolve_date;
use crate::output::{OutputMode, pretty_rule, render_mode};
use anyhow::Result;
use clap::Args;
use habit_core::stats::{DayStats, day_stats};
use habit_core::{Catalog, DateKey, Store, config};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct DayArgs {
    /// Day to show (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
struct TaskView {
    id: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    done: bool,
}

#[derive(Debug, Serialize)]
struct BlockView {
    id: String,
    title: String,
    tasks: Vec<TaskView>,
}

/// Report payload for `hb day`.
#[derive(Debug, Serialize)]
pub struct DayReport {
    date: DateKey,
    #[serde(flatten)]
    stats: DayStats,
    blocks: Vec<BlockView>,
}

/// Execute `hb day`.
pub fn run_day(args: &DayArgs, output: OutputMode, store: &Store, today: DateKey) -> Result<()> {
    let date = resolve_date(args.date.as_deref(), today)?;
    let (catalog, _levels) = config::load(store.data_dir())?;
    let log = store.load()?;

    let report = DayReport {
        date,
        stats: day_stats(&log, date, catalog.total_tasks()),
        blocks: block_views(&catalog, &log, date),
    };

    render_mode(output, &report, render_day_text, render_day_pretty)
}

fn block_views(catalog: &Catalog, log: &habit_core::CompletionLog, date: DateKey) -> Vec<BlockView> {
    catalog
        .blocks()
        .iter()
        .map(|block| BlockView {
            id: block.id.clone(),
            title: block.title.clone(),
            tasks: block
                .tasks
                .iter()
                .map(|task| TaskView {
                    id: task.id.clone(),
                    label: task.label.clone(),
                    note: task.note.clone(),
                    done: log.is_completed(date, &task.id),
                })
                .collect(),
        })
        .collect()
}

fn render_day_text(report: &DayReport, w: &mut dyn Write) -> std::io::Result<()> {
    for block in &report.blocks {
        for task in &block.tasks {
            let mark = if task.done { "done" } else { "todo" };
            writeln!(w, "{mark}  {}  {}", task.id, task.label)?;
        }
    }
    writeln!(
        w,
        "{}  {}/{} ({}%)",
        report.date, report.stats.completed, report.stats.total, report.stats.percentage
    )
}

fn render_day_pretty(report: &DayReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", report.date)?;
    for block in &report.blocks {
        writeln!(w)?;
        writeln!(w, "{}", block.title.to_uppercase())?;
        pretty_rule(w)?;
        for task in &block.tasks {
            let mark = if task.done { "[x]" } else { "[ ]" };
            match &task.note {
                Some(note) => writeln!(w, "  {mark} {:<32} {note}", task.label)?,
                None => writeln!(w, "  {mark} {}", task.label)?,
            }
        }
    }
    writeln!(w)?;
    writeln!(
        w,
        "Daily integrity: {}/{} ({}%){}",
        report.stats.completed,
        report.stats.total,
        report.stats.percentage,
        if report.stats.perfect { "  ★ perfect" } else { "" }
    )
}
