//! `hb calendar` — month grid colored by day completion status.

use crate::output::{OutputMode, render_mode};
use anyhow::Result;
use clap::Args;
use habit_core::stats::{DayStatus, classify};
use habit_core::{CompletionLog, DateKey, HabitError, Store, config, datekey};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct CalendarArgs {
    /// Month to show (defaults to the current month).
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
struct DayCell {
    date: DateKey,
    completed: usize,
    status: DayStatus,
}

/// Report payload for `hb calendar`.
#[derive(Debug, Serialize)]
pub struct CalendarReport {
    month: String,
    total_tasks: usize,
    days: Vec<DayCell>,
    #[serde(skip)]
    today: DateKey,
}

/// Execute `hb calendar`.
pub fn run_calendar(
    args: &CalendarArgs,
    output: OutputMode,
    store: &Store,
    today: DateKey,
) -> Result<()> {
    let (year, month) = match args.month.as_deref() {
        Some(raw) => parse_month(raw)?,
        None => (today.year(), today.month()),
    };
    let (catalog, _levels) = config::load(store.data_dir())?;
    let log = store.load()?;

    let report = CalendarReport {
        month: format!("{year:04}-{month:02}"),
        total_tasks: catalog.total_tasks(),
        days: month_cells(&log, year, month, catalog.total_tasks()),
        today,
    };

    render_mode(output, &report, render_calendar_text, render_calendar_pretty)
}

/// Strict `YYYY-MM` parse, zero-padded.
fn parse_month(input: &str) -> Result<(i32, u32), HabitError> {
    let first: DateKey = format!("{input}-01")
        .parse()
        .map_err(|_| HabitError::InvalidDate {
            input: input.to_string(),
        })?;
    Ok((first.year(), first.month()))
}

fn month_cells(log: &CompletionLog, year: i32, month: u32, total: usize) -> Vec<DayCell> {
    let len = datekey::days_in_month(year, month).unwrap_or(0);
    (1..=len)
        .filter_map(|day| DateKey::from_ymd(year, month, day))
        .map(|date| {
            let completed = log.completed_count(date);
            DayCell {
                date,
                completed,
                status: classify(completed, total),
            }
        })
        .collect()
}

const fn status_glyph(status: DayStatus) -> char {
    match status {
        DayStatus::Perfect => '#',
        DayStatus::Partial => '+',
        DayStatus::Empty => '·',
    }
}

fn render_calendar_text(report: &CalendarReport, w: &mut dyn Write) -> std::io::Result<()> {
    for cell in &report.days {
        let status = match cell.status {
            DayStatus::Perfect => "perfect",
            DayStatus::Partial => "partial",
            DayStatus::Empty => "empty",
        };
        writeln!(
            w,
            "{}  {status}  {}/{}",
            cell.date, cell.completed, report.total_tasks
        )?;
    }
    Ok(())
}

fn render_calendar_pretty(report: &CalendarReport, w: &mut dyn Write) -> std::io::Result<()> {
    let Some(first) = report.days.first() else {
        return writeln!(w, "{} has no days", report.month);
    };

    writeln!(
        w,
        "{:^28}",
        first.date.as_naive().format("%B %Y").to_string()
    )?;
    writeln!(w, " Mo  Tu  We  Th  Fr  Sa  Su")?;

    // leading blanks to align day 1 with its Monday-start column
    let mut column = usize::try_from(first.date.weekday_from_monday()).unwrap_or(0);
    let mut line = "    ".repeat(column);

    for cell in &report.days {
        let glyph = status_glyph(cell.status);
        let marker = if cell.date == report.today { '<' } else { ' ' };
        line.push_str(&format!("{:>2}{glyph}{marker}", cell.date.day()));
        column += 1;
        if column == 7 {
            writeln!(w, "{}", line.trim_end())?;
            line.clear();
            column = 0;
        }
    }
    if !line.is_empty() {
        writeln!(w, "{}", line.trim_end())?;
    }

    writeln!(w)?;
    writeln!(w, "# perfect   + partial   · empty   < today")
}
