//! The task catalog: time-of-day blocks and the tasks inside them.
//!
//! The catalog is fixed at process start. Blocks partition the task set;
//! block order is display-relevant only.

use crate::error::HabitError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One recurring daily task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A titled group of tasks tied to a time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBlock {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
}

/// The full, validated task catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    blocks: Vec<TaskBlock>,
}

impl Catalog {
    /// Validate and build a catalog from blocks.
    ///
    /// # Errors
    ///
    /// Rejects a catalog with zero tasks or with a task id appearing in
    /// more than one place.
    pub fn new(blocks: Vec<TaskBlock>) -> Result<Self, HabitError> {
        let mut seen = HashSet::new();
        let mut total = 0usize;
        for block in &blocks {
            for task in &block.tasks {
                total += 1;
                if !seen.insert(task.id.as_str()) {
                    return Err(HabitError::InvalidConfig {
                        reason: format!("duplicate task id '{}'", task.id),
                    });
                }
            }
        }
        if total == 0 {
            return Err(HabitError::InvalidConfig {
                reason: "catalog has no tasks".into(),
            });
        }
        Ok(Self { blocks })
    }

    /// The stock catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let blocks = vec![
            block(
                "morning",
                "Morning",
                &[
                    ("rhodiola", "Rhodiola rosea", Some("After waking up")),
                    ("training_am", "Training", Some("Morning session")),
                    (
                        "implant_install",
                        "Install \"Nicorette\" implant",
                        Some("System integration"),
                    ),
                    ("ascorbate", "Sodium ascorbate", Some("After breakfast")),
                    ("omega3", "Omega-3", Some("After breakfast")),
                    ("d3", "Vitamin D3", Some("After breakfast")),
                    ("zinc", "Zinc", Some("After breakfast")),
                ],
            ),
            block(
                "day",
                "Day",
                &[
                    ("training_noon", "Training", Some("Midday session")),
                    ("psyllium_noon", "Psyllium", Some("Before lunch")),
                ],
            ),
            block(
                "evening",
                "Evening",
                &[
                    ("training_pm", "Training", Some("Evening session")),
                    ("psyllium_pm", "Psyllium", Some("Before dinner")),
                    ("magnesium", "Magnesium", Some("Before sleep")),
                    (
                        "implant_remove",
                        "Remove \"Nicorette\" implant",
                        Some("System shutdown"),
                    ),
                ],
            ),
            block(
                "allday",
                "All day",
                &[("water", "Water / Hydration", Some("Keep fluid levels up"))],
            ),
        ];
        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[TaskBlock] {
        &self.blocks
    }

    /// Sum of tasks across all blocks. Always > 0 for a validated catalog.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.blocks.iter().map(|b| b.tasks.len()).sum()
    }

    #[must_use]
    pub fn contains(&self, task_id: &str) -> bool {
        self.task(task_id).is_some()
    }

    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.blocks
            .iter()
            .flat_map(|b| &b.tasks)
            .find(|t| t.id == task_id)
    }
}

fn block(id: &str, title: &str, tasks: &[(&str, &str, Option<&str>)]) -> TaskBlock {
    TaskBlock {
        id: id.into(),
        title: title.into(),
        tasks: tasks
            .iter()
            .map(|(id, label, note)| Task {
                id: (*id).into(),
                label: (*label).into(),
                note: note.map(Into::into),
            })
            .collect(),
    }
}
