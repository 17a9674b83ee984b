//! `hb stats` — streaks, XP, perfect days, and rank.

use crate::output::{OutputMode, pretty_kv, pretty_section, render};
use anyhow::Result;
use clap::Args;
use habit_core::stats::{GlobalStats, compute_stats};
use habit_core::{DateKey, Store, config};
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `hb stats`.
pub fn run_stats(
    _args: &StatsArgs,
    output: OutputMode,
    store: &Store,
    today: DateKey,
) -> Result<()> {
    let (catalog, levels) = config::load(store.data_dir())?;
    let log = store.load()?;
    let stats = compute_stats(&log, catalog.total_tasks(), today, &levels);

    render(output, &stats, render_stats_human)
}

fn render_stats_human(stats: &GlobalStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Habit stats")?;
    pretty_kv(w, "Streak", stats.current_streak.to_string())?;
    pretty_kv(w, "Max streak", stats.max_streak.to_string())?;
    pretty_kv(w, "Perfect days", stats.total_perfect_days.to_string())?;
    pretty_kv(w, "XP", stats.total_xp.to_string())?;
    pretty_kv(w, "Rank", &stats.level)?;

    let progress = stats.level_progress_percent();
    let filled = usize::try_from(progress / 10).unwrap_or(10).min(10);
    let bar: String = "#".repeat(filled) + &".".repeat(10 - filled);
    match stats.next_level_xp {
        Some(next) => pretty_kv(
            w,
            "Next rank",
            format!("[{bar}] {progress}% (at {next} XP)"),
        ),
        None => pretty_kv(w, "Next rank", "top of the table"),
    }
}
