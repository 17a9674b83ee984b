//! XP thresholds and level ranks.

use crate::error::HabitError;
use serde::{Deserialize, Serialize};

/// A named rank unlocked at a cumulative XP threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub min_xp: u64,
}

/// Levels sorted ascending by threshold; the first threshold is 0, so a
/// level always applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    /// Validate and build a table.
    ///
    /// # Errors
    ///
    /// Rejects an empty table, a first threshold other than 0, or
    /// thresholds that are not strictly increasing.
    pub fn new(levels: Vec<Level>) -> Result<Self, HabitError> {
        let Some(first) = levels.first() else {
            return Err(HabitError::InvalidConfig {
                reason: "level table is empty".into(),
            });
        };
        if first.min_xp != 0 {
            return Err(HabitError::InvalidConfig {
                reason: format!("first level '{}' must start at 0 XP", first.name),
            });
        }
        for pair in levels.windows(2) {
            if pair[1].min_xp <= pair[0].min_xp {
                return Err(HabitError::InvalidConfig {
                    reason: format!(
                        "level thresholds must be strictly increasing ('{}' at {} after {})",
                        pair[1].name, pair[1].min_xp, pair[0].min_xp
                    ),
                });
            }
        }
        Ok(Self { levels })
    }

    /// The stock progression shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let levels = [
            ("Novice", 0),
            ("Script Kiddie", 50),
            ("Netrunner", 200),
            ("Edgerunner", 500),
            ("Cyberpsycho", 1_000),
            ("Night City Legend", 2_000),
            ("Construct", 5_000),
        ]
        .into_iter()
        .map(|(name, min_xp)| Level {
            name: name.into(),
            min_xp,
        })
        .collect();
        Self { levels }
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The highest level whose threshold does not exceed `xp`.
    ///
    /// # Panics
    ///
    /// Never panics for a table built through [`LevelTable::new`] or
    /// [`LevelTable::builtin`]: the 0 threshold guarantees a match.
    #[must_use]
    pub fn resolve(&self, xp: u64) -> &Level {
        self.levels
            .iter()
            .rev()
            .find(|level| xp >= level.min_xp)
            .unwrap_or(&self.levels[0])
    }

    /// The next rank above `xp`, or `None` at the top of the table.
    #[must_use]
    pub fn next_after(&self, xp: u64) -> Option<&Level> {
        self.levels.iter().find(|level| level.min_xp > xp)
    }
}
