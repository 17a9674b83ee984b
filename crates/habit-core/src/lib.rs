//! habit-core: data model, stats engine, and persistence for cyber-habit.
//!
//! The completion log is the single source of truth; [`stats::compute_stats`]
//! and [`stats::classify`] are pure projections over it with "today"
//! injected by the caller.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::HabitError`] for semantic failures,
//!   `anyhow::Result` with context at the I/O boundary.
//! - **Logging**: `tracing` macros (`warn!`, `debug!`).

pub mod catalog;
pub mod config;
pub mod datekey;
pub mod error;
pub mod level;
pub mod log;
pub mod stats;
pub mod store;

pub use catalog::Catalog;
pub use datekey::DateKey;
pub use error::HabitError;
pub use level::LevelTable;
pub use log::CompletionLog;
pub use store::Store;
