use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    InvalidConfig,
    UnknownTask,
    InvalidDate,
    HistoryParseError,
    ImportShapeMismatch,
    HistoryWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::InvalidConfig => "E1003",
            Self::UnknownTask => "E2001",
            Self::InvalidDate => "E2002",
            Self::HistoryParseError => "E3001",
            Self::ImportShapeMismatch => "E3002",
            Self::HistoryWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Data directory not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfig => "Invalid catalog or level table",
            Self::UnknownTask => "Task not in catalog",
            Self::InvalidDate => "Invalid date key",
            Self::HistoryParseError => "History file parse error",
            Self::ImportShapeMismatch => "Import payload is not an object",
            Self::HistoryWriteFailed => "History file write failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `hb init` to create the data directory."),
            Self::ConfigParseError => Some("Fix syntax in config.toml and retry."),
            Self::InvalidConfig => {
                Some("Catalog needs unique task ids; levels need ascending thresholds from 0.")
            }
            Self::UnknownTask => Some("Run `hb tasks` to list valid task ids."),
            Self::InvalidDate => Some("Use the canonical YYYY-MM-DD form, zero-padded."),
            Self::HistoryParseError => {
                Some("Restore history.json from a backup or re-run `hb init --force`.")
            }
            Self::ImportShapeMismatch => {
                Some("Import expects a JSON object of date keys to task-id arrays.")
            }
            Self::HistoryWriteFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Typed failures crossing the habit-core boundary.
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("data directory not initialized at {}", path.display())]
    NotInitialized { path: PathBuf },

    #[error("failed to parse {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid catalog or level table: {reason}")]
    InvalidConfig { reason: String },

    #[error("task id '{task_id}' is not in the catalog")]
    UnknownTask { task_id: String },

    #[error("invalid date key '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("failed to parse history file: {reason}")]
    HistoryParse { reason: String },

    #[error("import payload must be a JSON object, got {actual}")]
    ImportShape { actual: &'static str },

    #[error("failed to write {}: {reason}", path.display())]
    HistoryWrite { path: PathBuf, reason: String },
}

impl HabitError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized { .. } => ErrorCode::NotInitialized,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::UnknownTask { .. } => ErrorCode::UnknownTask,
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::HistoryParse { .. } => ErrorCode::HistoryParseError,
            Self::ImportShape { .. } => ErrorCode::ImportShapeMismatch,
            Self::HistoryWrite { .. } => ErrorCode::HistoryWriteFailed,
        }
    }

    /// Stable `E####` identifier.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.code().code()
    }

    /// Remediation hint, falling back to the code's summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.code()
            .hint()
            .unwrap_or_else(|| self.code().message())
            .to_string()
    }
}
