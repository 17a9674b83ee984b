#![forbid(unsafe_code)]

mod cmd;
mod output;

use chrono::Local;
use clap::{Parser, Subcommand};
use habit_core::{DateKey, HabitError, Store};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cyber-habit: local-first daily habit tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Override the data directory (also `HABIT_DIR`).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize the habit data directory",
        long_about = "Create the data directory with an empty history and a config template.",
        after_help = "EXAMPLES:\n    # Initialize in the default location\n    hb init\n\n    # Reset an existing directory\n    hb init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Tracking",
        about = "Show a day's checklist",
        long_about = "Show the block/task checklist for a day with completion marks and progress.",
        after_help = "EXAMPLES:\n    # Today's checklist\n    hb day\n\n    # A past day\n    hb day --date 2024-03-01\n\n    # Emit machine-readable output\n    hb day --json"
    )]
    Day(cmd::day::DayArgs),

    #[command(
        next_help_heading = "Tracking",
        about = "Toggle a task's completion",
        long_about = "Flip one task's completion for a day and persist the history.",
        after_help = "EXAMPLES:\n    # Check off a task for today\n    hb toggle rhodiola\n\n    # Uncheck it again\n    hb toggle rhodiola\n\n    # Backfill a past day\n    hb toggle water --date 2024-03-01"
    )]
    Toggle(cmd::toggle::ToggleArgs),

    #[command(
        next_help_heading = "Read",
        about = "List the task catalog",
        long_about = "List all blocks and task ids so you know what to toggle.",
        after_help = "EXAMPLES:\n    # Show the catalog\n    hb tasks\n\n    # Emit machine-readable output\n    hb tasks --json"
    )]
    Tasks(cmd::tasks::TasksArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Show streaks, XP, and rank",
        long_about = "Compute global stats from the full history: streaks, perfect days, XP, rank.",
        after_help = "EXAMPLES:\n    # Show stats\n    hb stats\n\n    # Emit machine-readable output\n    hb stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Show a month calendar",
        long_about = "Render a Monday-start month grid with each day's completion status.",
        after_help = "EXAMPLES:\n    # Current month\n    hb calendar\n\n    # A specific month\n    hb calendar --month 2024-02"
    )]
    Calendar(cmd::calendar::CalendarArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Export the history to a backup file",
        long_about = "Write the completion log as a date-stamped, pretty-printed JSON backup.",
        after_help = "EXAMPLES:\n    # Backup into the current directory\n    hb export\n\n    # Explicit path\n    hb export --output ~/backups/habits.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Restore the history from a backup file",
        long_about = "Replace the completion log wholesale with the contents of a backup file.",
        after_help = "EXAMPLES:\n    # Restore from a backup\n    hb import cyber_habit_backup_2024-03-05.json\n\n    # Emit machine-readable output\n    hb import backup.json --json"
    )]
    Import(cmd::import::ImportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HABIT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "habit=debug,info"
        } else {
            "habit=info,warn"
        })
    });

    let format = env::var("HABIT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

/// The stats engine takes "today" as a parameter; this is the single place
/// the CLI reads it. `HABIT_TODAY` overrides the local clock so scripted
/// runs and e2e tests are deterministic.
fn resolve_today() -> anyhow::Result<DateKey> {
    if let Ok(raw) = env::var("HABIT_TODAY") {
        let key = raw.parse::<DateKey>()?;
        return Ok(key);
    }
    Ok(DateKey::from_naive(Local::now().date_naive()))
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.format, cli.json);
    let store = Store::resolve(cli.data_dir.clone())?;
    let today = resolve_today()?;

    let command_result = match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, &store),
        Commands::Day(ref args) => cmd::day::run_day(args, output, &store, today),
        Commands::Toggle(ref args) => cmd::toggle::run_toggle(args, output, &store, today),
        Commands::Tasks(ref args) => cmd::tasks::run_tasks(args, output, &store),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &store, today),
        Commands::Calendar(ref args) => cmd::calendar::run_calendar(args, output, &store, today),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &store, today),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &store),
    };

    if let Err(err) = command_result {
        // Typed core errors carry a code and a hint; render those with
        // JSON parity instead of the bare anyhow chain.
        if let Some(habit_err) = err.downcast_ref::<HabitError>() {
            output::render_error(output, &output::CliError::from(habit_err))?;
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_globally() {
        let cli = Cli::parse_from(["hb", "--json", "stats"]);
        assert!(cli.json);

        let cli = Cli::parse_from(["hb", "stats", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["hb", "--format", "text", "day"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn data_dir_flag_parses() {
        let cli = Cli::parse_from(["hb", "--data-dir", "/tmp/h", "stats"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/h")));
    }

    #[test]
    fn toggle_takes_task_and_date() {
        let cli = Cli::parse_from(["hb", "toggle", "rhodiola", "--date", "2024-03-01"]);
        match cli.command {
            Commands::Toggle(args) => {
                assert_eq!(args.task_id, "rhodiola");
                assert_eq!(args.date.as_deref(), Some("2024-03-01"));
            }
            other => panic!("expected toggle, got {other:?}"),
        }
    }

    #[test]
    fn calendar_takes_month() {
        let cli = Cli::parse_from(["hb", "calendar", "--month", "2024-02"]);
        assert!(matches!(cli.command, Commands::Calendar(_)));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["hb", "init"],
            vec!["hb", "day"],
            vec!["hb", "toggle", "water"],
            vec!["hb", "tasks"],
            vec!["hb", "stats"],
            vec!["hb", "calendar"],
            vec!["hb", "export"],
            vec!["hb", "import", "backup.json"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} — error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn import_requires_a_file() {
        assert!(Cli::try_parse_from(["hb", "import"]).is_err());
    }
}
