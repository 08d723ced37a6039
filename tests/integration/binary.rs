//! End-to-end runs of the demo binary

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_benchtier(dir: &TempDir, args: &[&str]) -> Output {
    let defaults = dir.path().join("defaults.toml");
    if !defaults.exists() {
        fs::write(&defaults, "[defaults]\nwarmup_iterations = 1\n").unwrap();
    }
    Command::new(env!("CARGO_BIN_EXE_benchtier"))
        .arg("--defaults")
        .arg(&defaults)
        .args(args)
        .current_dir(dir.path())
        .env_remove("BENCHTIER_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_cli_iterations_apply_to_every_benchmark() {
    let dir = TempDir::new().unwrap();
    let args = [
        "--format",
        "json",
        "--quiet",
        "--iterations",
        "3",
        "--warmup-iterations",
        "1",
    ];
    let output = run_benchtier(&dir, &args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let benchmarks = report["benchmarks"].as_array().unwrap();
    assert_eq!(benchmarks.len(), 5);
    for bench in benchmarks {
        assert_eq!(bench["iterations"], 3);
        assert_eq!(bench["warmup_iterations"], 1);
        let expected_unit = if bench["suite"] == "collections" { "us" } else { "ns" };
        assert_eq!(bench["time_unit"], expected_unit);
    }
}

#[test]
fn test_cli_time_unit_overrides_suite_time_unit() {
    let dir = TempDir::new().unwrap();
    let args = ["--format", "csv", "--quiet", "--iterations", "2", "--time-unit", "ms"];
    let output = run_benchtier(&dir, &args);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().skip(1).filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 5);
    for row in rows {
        assert_eq!(row.split(',').nth(2), Some("ms"), "{}", row);
    }
}

#[test]
fn test_filter_selects_benchmarks() {
    let dir = TempDir::new().unwrap();
    let output = run_benchtier(
        &dir,
        &["--format", "json", "--quiet", "--iterations", "2", "--filter", "^strings/"],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = report["benchmarks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["strings/concat", "strings/format", "strings/repeat"]);
}

#[test]
fn test_show_settings_lists_origins() {
    let dir = TempDir::new().unwrap();
    let output = run_benchtier(&dir, &["--show-settings", "--time-unit", "ms"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("strings/repeat"));
    let repeat_iterations = stdout
        .lines()
        .find(|line| line.contains("strings/repeat") && line.contains(" iterations "))
        .unwrap();
    assert!(repeat_iterations.contains(" 1000 "));
    assert!(repeat_iterations.contains("benchmark"));
    assert!(stdout.contains("custom_defaults"));
    assert!(stdout.contains("cli"));
}

#[test]
fn test_invalid_flag_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_benchtier(&dir, &["--iterations", "many"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_defaults_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_benchtier"))
        .args(["--defaults", "/nonexistent/benchtier-defaults.toml", "--format", "none"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
