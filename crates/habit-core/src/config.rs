//! Data-directory configuration.
//!
//! `config.toml` may replace the built-in task catalog (`[[blocks]]`) and
//! level table (`[[levels]]`). A missing file, or a file that omits either
//! table, falls back to the built-ins. Overrides are validated on load.

use crate::catalog::{Catalog, TaskBlock};
use crate::error::HabitError;
use crate::level::{Level, LevelTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub blocks: Vec<TaskBlock>,
    #[serde(default)]
    pub levels: Vec<Level>,
}

/// Load and validate the catalog and level table for a data directory.
///
/// # Errors
///
/// Fails on unreadable or syntactically invalid `config.toml` (`E1002`),
/// or on an override that breaks the catalog/level invariants (`E1003`).
pub fn load(data_dir: &Path) -> Result<(Catalog, LevelTable), HabitError> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok((Catalog::builtin(), LevelTable::builtin()));
    }

    let content = std::fs::read_to_string(&path).map_err(|err| HabitError::ConfigParse {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let config: ProjectConfig =
        toml::from_str(&content).map_err(|err| HabitError::ConfigParse {
            path: path.clone(),
            reason: err.to_string(),
        })?;

    let catalog = if config.blocks.is_empty() {
        Catalog::builtin()
    } else {
        Catalog::new(config.blocks)?
    };
    let levels = if config.levels.is_empty() {
        LevelTable::builtin()
    } else {
        LevelTable::new(config.levels)?
    };
    Ok((catalog, levels))
}
