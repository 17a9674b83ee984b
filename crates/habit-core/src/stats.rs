//! The stats engine and day classifier.
//!
//! Both are pure: the caller supplies the log snapshot, the catalog's task
//! total, and "today". Nothing here reads ambient time or storage, so every
//! computation is deterministic and unit-testable.

use crate::datekey::DateKey;
use crate::level::LevelTable;
use crate::log::CompletionLog;
use serde::Serialize;

/// XP awarded per completed task.
pub const XP_PER_TASK: u64 = 10;

/// Flat bonus XP for completing every task in the catalog on one day.
pub const PERFECT_DAY_BONUS: u64 = 100;

/// Completion status of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Empty,
    Partial,
    Perfect,
}

/// Classify a day by its completed-task count against the catalog total.
#[must_use]
pub const fn classify(completed: usize, total: usize) -> DayStatus {
    if completed == 0 {
        DayStatus::Empty
    } else if completed == total {
        DayStatus::Perfect
    } else {
        DayStatus::Partial
    }
}

/// Stats derived from the full completion log. Never persisted; always
/// reproducible from the log alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_perfect_days: u32,
    pub total_xp: u64,
    pub level: String,
    /// Threshold of the resolved level.
    pub level_min_xp: u64,
    /// Threshold of the next level, `None` at the top of the table.
    pub next_level_xp: Option<u64>,
}

impl GlobalStats {
    /// Progress through the current level band, 0–100.
    #[must_use]
    pub fn level_progress_percent(&self) -> u32 {
        self.next_level_xp.map_or(100, |next| {
            let span = next.saturating_sub(self.level_min_xp);
            let into = self.total_xp.saturating_sub(self.level_min_xp);
            if span == 0 {
                100
            } else {
                u32::try_from((into * 100 / span).min(100)).unwrap_or(100)
            }
        })
    }
}

/// Single-day completion summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
    pub perfect: bool,
}

/// Summarize one day's completion against the catalog total.
#[must_use]
pub fn day_stats(log: &CompletionLog, date: DateKey, total_tasks: usize) -> DayStats {
    let completed = log.completed_count(date);
    DayStats {
        completed,
        total: total_tasks,
        percentage: rounded_percent(completed, total_tasks),
        perfect: completed == total_tasks,
    }
}

fn rounded_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    u32::try_from((completed * 100 + total / 2) / total).unwrap_or(u32::MAX)
}

/// Compute global stats from the completion log.
///
/// XP accumulates over logged dates in any order: `10 × n` per day plus a
/// flat `100` bonus (and one perfect-day increment) when `n` equals the
/// catalog total.
///
/// Streaks are computed over the continuous daily timeline from the
/// earliest logged date through `today` inclusive, because a gap in the log
/// breaks a streak exactly as a logged-but-imperfect day would. An
/// imperfect *today* leaves the running streak untouched: the day is still
/// open. A log whose earliest date lies after `today` yields zero streaks;
/// the walk guards against the inverted range instead of looping.
#[must_use]
pub fn compute_stats(
    log: &CompletionLog,
    total_tasks: usize,
    today: DateKey,
    levels: &LevelTable,
) -> GlobalStats {
    let mut total_perfect_days = 0u32;
    let mut total_xp = 0u64;
    for (_, tasks) in log.iter() {
        let n = tasks.len();
        total_xp += XP_PER_TASK * n as u64;
        if n == total_tasks {
            total_xp += PERFECT_DAY_BONUS;
            total_perfect_days += 1;
        }
    }

    let mut run = 0u32;
    let mut max_streak = 0u32;
    if let Some(first) = log.first_date() {
        let mut day = first;
        while day <= today {
            if log.completed_count(day) == total_tasks {
                run += 1;
            } else if day < today {
                run = 0;
            }
            max_streak = max_streak.max(run);
            match day.succ() {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    let level = levels.resolve(total_xp);
    GlobalStats {
        current_streak: run,
        max_streak,
        total_perfect_days,
        total_xp,
        level: level.name.clone(),
        level_min_xp: level.min_xp,
        next_level_xp: levels.next_after(total_xp).map(|l| l.min_xp),
    }
}
