//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! (HEARTH_ENV=dev) and verify outputs.

use std::process::Command;
use std::sync::Mutex;

/// Tests share one dev config file, so they must not interleave.
static CLI_LOCK: Mutex<()> = Mutex::new(());

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "hearth-cli", "--"])
        .args(args)
        .env("HEARTH_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
}

#[test]
fn test_config_set_and_get() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, _, code) = run_cli(&["config", "set", "display.currency", "USD"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&["config", "get", "display.currency"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "USD");
}

#[test]
fn test_config_unknown_key_fails() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, stderr, code) = run_cli(&["config", "get", "nope"]);
    assert_ne!(code, 0, "unknown key unexpectedly succeeded");
    assert!(stderr.contains("error:"));
}

#[test]
fn test_task_lifecycle() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, _, code) = run_cli(&["config", "set", "active_user", "test-user"]);
    assert_eq!(code, 0);

    let (stdout, stderr, code) = run_cli(&["household", "create", "Test House"]);
    assert_eq!(code, 0, "household create failed: {stderr}");
    assert!(stdout.contains("Household created:"));

    let (stdout, stderr, code) = run_cli(&[
        "task", "create", "Water test plant", "--room", "living", "--frequency", "daily",
        "--start", "2025-01-06",
    ]);
    assert_eq!(code, 0, "task create failed: {stderr}");
    assert!(stdout.contains("Task created:"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed");
    let tasks: serde_json::Value = {
        let json_start = stdout.find('[').expect("no JSON array in output");
        serde_json::from_str(&stdout[json_start..]).expect("invalid JSON output")
    };
    assert!(tasks.as_array().map_or(false, |t| !t.is_empty()));

    let (stdout, _, code) = run_cli(&["task", "due", "--date", "2025-06-02"]);
    assert_eq!(code, 0, "task due failed");
    assert!(stdout.contains("Water test plant"));
}

#[test]
fn test_expense_and_summary() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, _, code) = run_cli(&["config", "set", "active_user", "test-user"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&["household", "create", "Expense House"]);
    assert_eq!(code, 0);

    let (stdout, stderr, code) = run_cli(&[
        "expense", "add", "42.50", "weekly groceries", "--category", "groceries",
    ]);
    assert_eq!(code, 0, "expense add failed: {stderr}");
    assert!(stdout.contains("Expense recorded:"));

    let (stdout, _, code) = run_cli(&["expense", "summary"]);
    assert_eq!(code, 0, "expense summary failed");
    assert!(stdout.contains("Total:"));
}

#[test]
fn test_search_without_term_matches_nothing() {
    let _guard = CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let (_, _, code) = run_cli(&["config", "set", "active_user", "test-user"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&["household", "create", "Search House"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&["search", "zzz-no-such-thing"]);
    assert_eq!(code, 0, "search failed");
    let json_start = stdout.find('[').expect("no JSON array in output");
    let results: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(results.as_array().map(|r| r.len()), Some(0));
}
