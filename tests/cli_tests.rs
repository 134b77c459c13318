#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::fs;
use tempfile::tempdir;

const SETTINGS: &str = include_str!("fixtures/settings.yaml");
const GOLDEN: &str = include_str!("fixtures/peakshift_golden.reg");

#[allow(deprecated)]
fn peakshift() -> Command {
    Command::cargo_bin("peakshift").expect("peakshift binary")
}

#[test]
fn missing_output_path_prints_usage() {
    peakshift()
        .assert()
        .failure()
        .stderr(str_contains("Usage"));
}

#[test]
fn help_lists_continue_flag() {
    peakshift()
        .arg("--help")
        .assert()
        .success()
        .stdout(str_contains("--continue"));
}

#[test]
fn writes_golden_file_when_checks_are_overridden() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.yaml");
    fs::write(&config, SETTINGS).unwrap();
    let output = dir.path().join("peakshift.reg");
    let csv = dir.path().join("periods.csv");

    peakshift()
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .args(["--start-date", "2025-12-22", "-c"])
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(str_contains("PeakShift1: 2025-12-22 to 2025-12-24 (3 days)"))
        .stdout(str_contains("PeakShift4: 2026-01-05 to 2026-01-09 (5 days)"));

    assert_eq!(fs::read_to_string(&output).unwrap(), GOLDEN);
    assert!(fs::read_to_string(&csv).unwrap().starts_with("index,start,end,days"));
}

#[test]
fn invalid_settings_abort_before_writing() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.yaml");
    fs::write(&config, SETTINGS.replace("minCharge: 80", "minCharge: 180")).unwrap();
    let output = dir.path().join("peakshift.reg");

    peakshift()
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .args(["--start-date", "2025-12-22", "-c"])
        .assert()
        .failure()
        .stderr(str_contains("minCharge"));

    assert!(!output.exists());
}

#[cfg(not(windows))]
#[test]
fn failed_checks_abort_without_continue() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.yaml");
    fs::write(&config, SETTINGS).unwrap();
    let output = dir.path().join("peakshift.reg");

    peakshift()
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .args(["--start-date", "2025-12-22"])
        .assert()
        .failure()
        .stderr(str_contains("prerequisite check(s) failed"));

    assert!(!output.exists());
}
