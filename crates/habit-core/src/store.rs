//! History persistence, backup export, and restore import.
//!
//! The completion log lives in `history.json` inside the data directory.
//! Export writes a backup file with the same byte shape; import performs a
//! shallow structural check and then wholesale-replaces the log (no merge).

use crate::datekey::DateKey;
use crate::error::HabitError;
use crate::log::{Adoption, CompletionLog};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HISTORY_FILE: &str = "history.json";

/// Prefix of exported backup files; the export date completes the name.
pub const BACKUP_PREFIX: &str = "cyber_habit_backup_";

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "HABIT_DIR";

const APP_DIR: &str = "cyber-habit";

/// Handle on the data directory holding history and config.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory: explicit flag, then `HABIT_DIR`, then
    /// the platform data dir.
    ///
    /// # Errors
    ///
    /// Fails only when no flag or env override is given and the platform
    /// reports no data directory.
    pub fn resolve(flag: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = flag {
            return Ok(Self::new(dir));
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(Self::new(PathBuf::from(dir)));
        }
        let base = dirs::data_dir().context("no platform data directory available")?;
        Ok(Self::new(base.join(APP_DIR)))
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    /// Whether `hb init` has been run for this directory.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.history_path().exists()
    }

    /// Load the completion log. A missing file is the empty log (first
    /// run); a present-but-unparsable file is a typed error and the
    /// caller's in-memory state is left alone.
    ///
    /// # Errors
    ///
    /// `E1001` when the store was never initialized, `E3001` when the
    /// history file cannot be read or parsed.
    pub fn load(&self) -> Result<CompletionLog> {
        let path = self.history_path();
        if !path.exists() {
            if !self.data_dir.exists() {
                return Err(HabitError::NotInitialized {
                    path: self.data_dir.clone(),
                }
                .into());
            }
            debug!(path = %path.display(), "no history file, starting empty");
            return Ok(CompletionLog::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|err| HabitError::HistoryParse {
            reason: format!("{}: {err}", path.display()),
        })?;
        let log = serde_json::from_str(&content).map_err(|err| HabitError::HistoryParse {
            reason: format!("{}: {err}", path.display()),
        })?;
        Ok(log)
    }

    /// Persist the log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// `E5001` on any write failure. Callers decide whether that is fatal;
    /// the toggle path treats it as best-effort and logs instead.
    pub fn save(&self, log: &CompletionLog) -> Result<()> {
        let path = self.history_path();
        let json = serde_json::to_string_pretty(log).context("failed to serialize history")?;
        std::fs::write(&path, json).map_err(|err| HabitError::HistoryWrite {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), days = log.days_logged(), "history saved");
        Ok(())
    }

    /// Write a backup of `log` and return its path.
    ///
    /// With no explicit `output`, the file lands in the current directory
    /// as `cyber_habit_backup_<export-date>.json`, byte-for-byte the shape
    /// of the persisted history.
    ///
    /// # Errors
    ///
    /// Fails when the output file cannot be written.
    pub fn export_backup(
        log: &CompletionLog,
        output: Option<PathBuf>,
        exported_on: DateKey,
    ) -> Result<PathBuf> {
        let path = output
            .unwrap_or_else(|| PathBuf::from(format!("{BACKUP_PREFIX}{exported_on}.json")));
        let json = serde_json::to_string_pretty(log).context("failed to serialize history")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write backup {}", path.display()))?;
        Ok(path)
    }

    /// Parse a backup file into a log, defensively.
    ///
    /// The payload must parse as JSON and be an object; anything else is
    /// rejected with the existing log untouched (`E3001`/`E3002`). Below
    /// that shallow check, malformed entries are skipped and counted in
    /// the returned [`Adoption`] report.
    ///
    /// # Errors
    ///
    /// Read, parse, and shape failures as above.
    pub fn read_backup(path: &Path) -> Result<(CompletionLog, Adoption)> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|err| HabitError::HistoryParse {
                reason: format!("{}: {err}", path.display()),
            })?;
        let object = value.as_object().ok_or(HabitError::ImportShape {
            actual: json_type_name(&value),
        })?;
        Ok(CompletionLog::from_json_value(object))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
