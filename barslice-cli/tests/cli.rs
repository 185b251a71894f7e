//! Runs the `barslice` binary against temp data folders.

use std::path::Path;
use std::process::{Command, Output};

fn barslice(dir: &Path, args: &[&str]) -> Output {
    barslice_with_config(dir, "missing.toml", args)
}

fn barslice_with_config(dir: &Path, config: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_barslice"))
        .arg("--config")
        .arg(dir.join(config))
        .arg("--data-dir")
        .arg(dir.join("data"))
        .args(args)
        .output()
        .unwrap()
}

fn write_hourly(dir: &Path, name: &str, rows: usize) {
    let data = dir.join("data");
    std::fs::create_dir_all(&data).unwrap();
    let mut content = String::from("timestamp,close\n");
    for i in 0..rows {
        content.push_str(&format!("2024-02-01 {:02}:00:00,{}.5\n", i, 100 + i));
    }
    std::fs::write(data.join(name), content).unwrap();
}

#[test]
fn list_reports_empty_folder() {
    let dir = tempfile::tempdir().unwrap();
    let out = barslice(dir.path(), &["list"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Data folder is empty"));
}

#[test]
fn list_prints_sorted_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "b.csv", 2);
    write_hourly(dir.path(), "a.csv", 2);
    std::fs::write(dir.path().join("data").join("notes.txt"), "x").unwrap();

    let out = barslice(dir.path(), &["list"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout), "a.csv\nb.csv\n");
}

#[test]
fn extract_clamps_and_prints_next_close() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "btc.csv", 5);

    let out = barslice(dir.path(), &["extract", "--count", "10", "--seed", "1"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("next close: 104.50"));
    assert!(stdout.contains("rows 0..4"));
}

#[test]
fn extract_is_reproducible_with_seed_and_iteration() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "btc.csv", 24);
    let args = [
        "extract", "--min", "2", "--max", "8", "--seed", "99", "--iteration", "3",
    ];

    let first = barslice(dir.path(), &args);
    let second = barslice(dir.path(), &args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("this extraction:"));
}

#[test]
fn unknown_file_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "btc.csv", 5);

    let out = barslice(dir.path(), &["extract", "--file", "eth.csv"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no file named 'eth.csv'"));
}

#[test]
fn target_flag_overrides_noon_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "btc.csv", 5);
    std::fs::write(dir.path().join("barslice.toml"), "target = \"next_noon\"\n").unwrap();

    // 00:00..04:00 has no 12:00 bar, so the configured target misses.
    let from_settings =
        barslice_with_config(dir.path(), "barslice.toml", &["extract", "--count", "10"]);
    assert!(from_settings.status.success());
    assert!(String::from_utf8_lossy(&from_settings.stdout).contains("next 12:00 close: not found"));

    let next_bar = barslice_with_config(
        dir.path(),
        "barslice.toml",
        &["extract", "--count", "10", "--target", "next-bar"],
    );
    assert!(next_bar.status.success());
    assert!(String::from_utf8_lossy(&next_bar.stdout).contains("next close: 104.50"));
}

#[test]
fn noon_and_target_flags_conflict() {
    let dir = tempfile::tempdir().unwrap();
    write_hourly(dir.path(), "btc.csv", 5);
    let out = barslice(dir.path(), &["extract", "--noon", "--target", "next-bar"]);
    assert!(!out.status.success());
}
