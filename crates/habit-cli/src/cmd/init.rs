use anyhow::{Context as _, Result};
use clap::Args;
use habit_core::Store;
use habit_core::config::CONFIG_FILE;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if the data directory already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "# cyber-habit configuration.\n\
    #\n\
    # The built-in task catalog and level table apply when this file has no\n\
    # [[blocks]] / [[levels]] tables. Uncomment and edit to replace them.\n\
    #\n\
    # [[blocks]]\n\
    # id = \"morning\"\n\
    # title = \"Morning\"\n\
    #\n\
    #   [[blocks.tasks]]\n\
    #   id = \"rhodiola\"\n\
    #   label = \"Rhodiola rosea\"\n\
    #   note = \"After waking up\"\n\
    #\n\
    # [[levels]]\n\
    # name = \"Novice\"\n\
    # min_xp = 0\n";

/// Execute `hb init`. Creates the data directory skeleton:
///
/// ```text
/// <data-dir>/
///   history.json    (empty completion log)
///   config.toml     (commented template for catalog/level overrides)
/// ```
///
/// # Errors
///
/// Returns an error if the store is already initialized and `--force` is
/// not set, or if any filesystem operation fails.
pub fn run_init(args: &InitArgs, store: &Store) -> Result<()> {
    if store.is_initialized() && !args.force {
        anyhow::bail!(
            "{} already exists. Use `hb init --force` to reinitialize.",
            store.history_path().display()
        );
    }

    std::fs::create_dir_all(store.data_dir()).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            store.data_dir().display()
        )
    })?;

    let history_path = store.history_path();
    std::fs::write(&history_path, "{}\n")
        .with_context(|| format!("Failed to write history: {}", history_path.display()))?;

    let config_path = store.data_dir().join(CONFIG_FILE);
    if !config_path.exists() || args.force {
        std::fs::write(&config_path, CONFIG_TOML)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    }

    // Onboarding hints
    println!("✓ Initialized habit data directory.");
    println!();
    println!("  History: {}", history_path.display());
    println!("  Config:  {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  See today's checklist:");
    println!("    hb day");
    println!();
    println!("  Check off your first task:");
    println!("    hb toggle rhodiola");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{InitArgs, run_init};
    use habit_core::Store;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Store {
        Store::new(dir.path().join("data"))
    }

    #[test]
    fn fresh_init_creates_structure() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        run_init(&InitArgs { force: false }, &store).expect("init should succeed");

        assert!(store.data_dir().is_dir());
        assert!(store.history_path().is_file());
        assert!(store.data_dir().join("config.toml").is_file());

        let history = fs::read_to_string(store.history_path()).expect("history readable");
        assert_eq!(history.trim(), "{}");
    }

    #[test]
    fn reinit_without_force_fails() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        run_init(&InitArgs { force: false }, &store).expect("first init should succeed");

        let result = run_init(&InitArgs { force: false }, &store);
        assert!(result.is_err(), "reinit without --force must fail");
    }

    #[test]
    fn reinit_with_force_resets_history() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        run_init(&InitArgs { force: false }, &store).expect("first init should succeed");
        fs::write(store.history_path(), r#"{"2024-01-01":["water"]}"#).expect("write history");

        run_init(&InitArgs { force: true }, &store).expect("reinit --force should succeed");
        let history = fs::read_to_string(store.history_path()).expect("history readable");
        assert_eq!(history.trim(), "{}");
    }

    #[test]
    fn config_template_parses_as_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        run_init(&InitArgs { force: false }, &store).expect("init should succeed");

        // the commented template must not override anything
        let (catalog, levels) =
            habit_core::config::load(store.data_dir()).expect("template must parse");
        assert_eq!(catalog.total_tasks(), 14);
        assert_eq!(levels.resolve(0).name, "Novice");
    }
}
