//! E2E CLI lifecycle tests: init -> toggle -> day/stats -> export/import.
//!
//! Each test runs `hb` as a subprocess against an isolated temp data
//! directory, with `HABIT_TODAY` pinned so streak math is deterministic.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Every task id in the built-in catalog.
const ALL_TASKS: [&str; 14] = [
    "rhodiola",
    "training_am",
    "implant_install",
    "ascorbate",
    "omega3",
    "d3",
    "zinc",
    "training_noon",
    "psyllium_noon",
    "training_pm",
    "psyllium_pm",
    "magnesium",
    "implant_remove",
    "water",
];

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the hb binary, with its data dir in `dir`.
fn hb_cmd(dir: &Path, today: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hb"));
    cmd.env("HABIT_DIR", dir.join("data"));
    cmd.env("HABIT_TODAY", today);
    // Suppress tracing output that goes to stderr
    cmd.env("HABIT_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

/// Initialize a habit data directory in `dir`.
fn init_store(dir: &Path, today: &str) {
    hb_cmd(dir, today).args(["init"]).assert().success();
}

/// Toggle `task_id` for a specific date.
fn toggle_on(dir: &Path, today: &str, task_id: &str, date: &str) {
    hb_cmd(dir, today)
        .args(["toggle", task_id, "--date", date])
        .assert()
        .success();
}

/// Run a subcommand with `--json` and parse stdout.
fn run_json(dir: &Path, today: &str, args: &[&str]) -> Value {
    let mut full_args = args.to_vec();
    full_args.push("--json");
    let output = hb_cmd(dir, today)
        .args(&full_args)
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn stats_json(dir: &Path, today: &str) -> Value {
    run_json(dir, today, &["stats"])
}

// ===========================================================================
// Lifecycle
// ===========================================================================

#[test]
fn init_creates_structure_and_guards_reinit() {
    let dir = TempDir::new().expect("temp dir");
    init_store(dir.path(), "2024-03-02");

    assert!(dir.path().join("data/history.json").is_file());
    assert!(dir.path().join("data/config.toml").is_file());

    hb_cmd(dir.path(), "2024-03-02")
        .args(["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    hb_cmd(dir.path(), "2024-03-02")
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn commands_before_init_fail_with_hint() {
    let dir = TempDir::new().expect("temp dir");
    hb_cmd(dir.path(), "2024-03-02")
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hb init"));
}

#[test]
fn toggle_marks_then_unmarks() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);

    let report = run_json(dir.path(), today, &["toggle", "rhodiola"]);
    assert_eq!(report["done"], Value::Bool(true));
    assert_eq!(report["in_catalog"], Value::Bool(true));
    assert_eq!(report["completed"], 1);
    assert_eq!(report["total"], 14);

    let day = run_json(dir.path(), today, &["day"]);
    let morning_tasks = day["blocks"][0]["tasks"].as_array().expect("tasks array");
    assert_eq!(morning_tasks[0]["id"], "rhodiola");
    assert_eq!(morning_tasks[0]["done"], Value::Bool(true));

    // toggling again returns to the original state
    let report = run_json(dir.path(), today, &["toggle", "rhodiola"]);
    assert_eq!(report["done"], Value::Bool(false));
    assert_eq!(report["completed"], 0);
}

#[test]
fn unknown_task_is_tolerated_but_flagged() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);

    let report = run_json(dir.path(), today, &["toggle", "flux_capacitor"]);
    assert_eq!(report["done"], Value::Bool(true));
    assert_eq!(report["in_catalog"], Value::Bool(false));
}

// ===========================================================================
// Stats
// ===========================================================================

#[test]
fn scenario_partial_then_perfect_day() {
    // One task on 03-01, all fourteen on 03-02 (today):
    // 10 + (14*10 + 100) = 250 XP, one perfect day, streak 1/1.
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);

    toggle_on(dir.path(), today, "rhodiola", "2024-03-01");
    for task in ALL_TASKS {
        toggle_on(dir.path(), today, task, "2024-03-02");
    }

    let stats = stats_json(dir.path(), today);
    assert_eq!(stats["total_xp"], 250);
    assert_eq!(stats["total_perfect_days"], 1);
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["max_streak"], 1);
    assert_eq!(stats["level"], "Netrunner");
    assert_eq!(stats["next_level_xp"], 500);
}

#[test]
fn open_today_does_not_break_streak() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-01-03";
    init_store(dir.path(), today);

    for date in ["2024-01-01", "2024-01-02"] {
        for task in ALL_TASKS {
            toggle_on(dir.path(), today, task, date);
        }
    }

    // nothing logged for today yet: the streak stays alive
    let stats = stats_json(dir.path(), today);
    assert_eq!(stats["current_streak"], 2);
    assert_eq!(stats["max_streak"], 2);
}

#[test]
fn gap_in_history_breaks_streak() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-01-03";
    init_store(dir.path(), today);

    for date in ["2024-01-01", "2024-01-03"] {
        for task in ALL_TASKS {
            toggle_on(dir.path(), today, task, date);
        }
    }

    let stats = stats_json(dir.path(), today);
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["max_streak"], 1);
}

// ===========================================================================
// Calendar
// ===========================================================================

#[test]
fn calendar_classifies_days() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-02-15";
    init_store(dir.path(), today);

    toggle_on(dir.path(), today, "water", "2024-02-01");
    for task in ALL_TASKS {
        toggle_on(dir.path(), today, task, "2024-02-02");
    }

    let report = run_json(dir.path(), today, &["calendar", "--month", "2024-02"]);
    assert_eq!(report["month"], "2024-02");
    let days = report["days"].as_array().expect("days array");
    assert_eq!(days.len(), 29); // leap February
    assert_eq!(days[0]["status"], "partial");
    assert_eq!(days[1]["status"], "perfect");
    assert_eq!(days[2]["status"], "empty");
}

#[test]
fn calendar_rejects_malformed_month() {
    let dir = TempDir::new().expect("temp dir");
    init_store(dir.path(), "2024-03-02");
    hb_cmd(dir.path(), "2024-03-02")
        .args(["calendar", "--month", "2024-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM"));
}

// ===========================================================================
// Backup
// ===========================================================================

#[test]
fn export_import_round_trip_preserves_stats() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);

    toggle_on(dir.path(), today, "rhodiola", "2024-03-01");
    for task in ALL_TASKS {
        toggle_on(dir.path(), today, task, "2024-03-02");
    }
    let before = stats_json(dir.path(), today);

    let backup = dir.path().join("backup.json");
    let report = run_json(
        dir.path(),
        today,
        &["export", "--output", backup.to_str().expect("utf8 path")],
    );
    assert_eq!(report["days"], 2);
    assert!(backup.is_file());

    // restore into a fresh store
    let other = TempDir::new().expect("temp dir");
    init_store(other.path(), today);
    let report = run_json(
        other.path(),
        today,
        &["import", backup.to_str().expect("utf8 path")],
    );
    assert_eq!(report["imported_days"], 2);
    assert_eq!(report["skipped_entries"], 0);

    let after = stats_json(other.path(), today);
    assert_eq!(before, after);
}

#[test]
fn export_uses_date_stamped_default_name() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-05";
    init_store(dir.path(), today);
    toggle_on(dir.path(), today, "water", "2024-03-05");

    // run from inside the temp dir so the default-named file lands there
    let output = hb_cmd(dir.path(), today)
        .args(["export"])
        .current_dir(dir.path())
        .output()
        .expect("export should not crash");
    assert!(output.status.success());
    assert!(dir.path().join("cyber_habit_backup_2024-03-05.json").is_file());
}

#[test]
fn import_rejects_non_object_payload() {
    let dir = TempDir::new().expect("temp dir");
    init_store(dir.path(), "2024-03-02");

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "[1, 2, 3]").expect("write payload");

    hb_cmd(dir.path(), "2024-03-02")
        .args(["import", bad.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));

    // the existing (empty) history is untouched
    let history = std::fs::read_to_string(dir.path().join("data/history.json"))
        .expect("history readable");
    assert_eq!(history.trim(), "{}");
}

#[test]
fn import_skips_malformed_entries() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);

    let mixed = dir.path().join("mixed.json");
    std::fs::write(
        &mixed,
        r#"{"2024-03-01": ["water"], "not-a-date": ["x"], "2024-03-02": 7}"#,
    )
    .expect("write payload");

    let report = run_json(
        dir.path(),
        today,
        &["import", mixed.to_str().expect("utf8 path")],
    );
    assert_eq!(report["imported_days"], 1);
    assert_eq!(report["skipped_entries"], 2);

    let stats = stats_json(dir.path(), today);
    assert_eq!(stats["total_xp"], 10);
}

// ===========================================================================
// Output parity
// ===========================================================================

#[test]
fn day_text_mode_emits_rows() {
    let dir = TempDir::new().expect("temp dir");
    let today = "2024-03-02";
    init_store(dir.path(), today);
    toggle_on(dir.path(), today, "rhodiola", today);

    hb_cmd(dir.path(), today)
        .args(["day", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done  rhodiola"))
        .stdout(predicate::str::contains("todo  water"));
}

#[test]
fn tasks_lists_the_catalog() {
    let dir = TempDir::new().expect("temp dir");
    init_store(dir.path(), "2024-03-02");

    hb_cmd(dir.path(), "2024-03-02")
        .args(["tasks", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("morning  rhodiola"))
        .stdout(predicate::str::contains("allday  water"));
}
