//! The completion log: date keys to sets of completed task ids.
//!
//! The log is the single source of truth. Stats are always recomputed from
//! it, never stored. On disk it is a JSON object of `YYYY-MM-DD` keys to
//! arrays of task-id strings.

use crate::datekey::DateKey;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Date-indexed record of completed task ids. Absent key ≡ empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLog {
    entries: BTreeMap<DateKey, BTreeSet<String>>,
}

/// Result of adopting untrusted JSON into a log (see [`CompletionLog::from_json_value`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Adoption {
    /// Entries that survived as log days.
    pub adopted_days: usize,
    /// Object entries dropped for a malformed key or value shape.
    pub skipped_entries: usize,
    /// Array elements dropped for not being strings.
    pub skipped_values: usize,
}

impl CompletionLog {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of days with a logged entry (including empty ones).
    #[must_use]
    pub fn days_logged(&self) -> usize {
        self.entries.len()
    }

    /// The chronologically earliest logged day.
    #[must_use]
    pub fn first_date(&self) -> Option<DateKey> {
        self.entries.keys().next().copied()
    }

    /// Completed-task count for a day; 0 when absent.
    #[must_use]
    pub fn completed_count(&self, date: DateKey) -> usize {
        self.entries.get(&date).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn is_completed(&self, date: DateKey, task_id: &str) -> bool {
        self.entries
            .get(&date)
            .is_some_and(|tasks| tasks.contains(task_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateKey, &BTreeSet<String>)> {
        self.entries.iter().map(|(date, tasks)| (*date, tasks))
    }

    /// Flip one task's membership for a day, returning the new log.
    ///
    /// The prior log is untouched so callers can detect change and trigger
    /// recomputation and persistence deterministically. A day whose set
    /// becomes empty is dropped, keeping absent-key ≡ empty-set canonical.
    /// The task id is not validated against any catalog.
    #[must_use]
    pub fn toggle(&self, date: DateKey, task_id: &str) -> Self {
        let mut next = self.clone();
        let tasks = next.entries.entry(date).or_default();
        if !tasks.remove(task_id) {
            tasks.insert(task_id.to_string());
        }
        if tasks.is_empty() {
            next.entries.remove(&date);
        }
        next
    }

    /// Adopt an untrusted JSON object as a log, defensively.
    ///
    /// The caller has already verified `value` is an object. Entries with a
    /// non-canonical date key or a non-array value are skipped with a
    /// warning; non-string array elements are likewise skipped. Duplicate
    /// ids within a day collapse silently.
    #[must_use]
    pub fn from_json_value(value: &serde_json::Map<String, JsonValue>) -> (Self, Adoption) {
        let mut log = Self::default();
        let mut adoption = Adoption::default();

        for (key, entry) in value {
            let Ok(date) = key.parse::<DateKey>() else {
                warn!(key, "skipping entry with non-canonical date key");
                adoption.skipped_entries += 1;
                continue;
            };
            let Some(items) = entry.as_array() else {
                warn!(key, "skipping entry whose value is not an array");
                adoption.skipped_entries += 1;
                continue;
            };

            let mut tasks = BTreeSet::new();
            for item in items {
                if let Some(id) = item.as_str() {
                    tasks.insert(id.to_string());
                } else {
                    warn!(key, "skipping non-string task id");
                    adoption.skipped_values += 1;
                }
            }
            if !tasks.is_empty() {
                log.entries.insert(date, tasks);
            }
            adoption.adopted_days += 1;
        }

        (log, adoption)
    }
}
