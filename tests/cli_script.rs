mod common;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use predicates::str::contains;

use common::fixture;

fn bill_split() -> Command {
    let mut cmd = Command::cargo_bin("bill_split").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn table_run_prints_ledger_and_writes_csv() {
    let out = TempDir::new().unwrap();
    bill_split()
        .arg("--input")
        .arg(fixture("bills.yaml"))
        .arg("--output-dir")
        .arg(out.path())
        .arg("--plain")
        .assert()
        .success()
        .stdout(contains("Electric Adjusted"))
        .stdout(contains("Total"))
        .stdout(contains("1943.464"));

    let csv = out.child("March 2024.csv");
    csv.assert(predicate::path::exists());
    csv.assert(contains("Total,1020,2000,2000,600,1500,4100"));
}

#[test]
fn json_format_prints_a_document() {
    let out = TempDir::new().unwrap();
    let assert = bill_split()
        .arg("-i")
        .arg(fixture("bills.yaml"))
        .args(["--format", "json", "--no-csv"])
        .current_dir(out.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["period"], "March 2024");
    assert_eq!(value["total"]["water"], 600.0);
}

#[test]
fn no_csv_leaves_the_directory_untouched() {
    let out = TempDir::new().unwrap();
    bill_split()
        .arg("-i")
        .arg(fixture("bills.yaml"))
        .arg("-o")
        .arg(out.path())
        .arg("--no-csv")
        .assert()
        .success();

    out.child("March 2024.csv").assert(predicate::path::missing());
}

#[test]
fn details_flag_prints_consumption_breakdown() {
    let out = TempDir::new().unwrap();
    bill_split()
        .arg("-i")
        .arg(fixture("bills.yaml"))
        .args(["--details", "--plain", "--no-csv"])
        .current_dir(out.path())
        .assert()
        .success()
        .stdout(contains("Electricity consumption, February 2024 to March 2024"))
        .stdout(contains("49.02%"));
}

#[test]
fn config_file_is_honoured() {
    let out = TempDir::new().unwrap();
    let config = out.child("config.yaml");
    config
        .write_str("internet:\n  share_count: 3\n  eligible: [Jack, Ian, Ajin]\n")
        .unwrap();

    bill_split()
        .arg("-i")
        .arg(fixture("bills.yaml"))
        .arg("-c")
        .arg(config.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    out.child("March 2024.csv")
        .assert(contains("Ajin,100,196.078,209.15,200,500,909.15"));
}

#[test]
fn missing_input_reports_data_error() {
    let out = TempDir::new().unwrap();
    bill_split()
        .arg("-i")
        .arg(out.child("absent.yaml").path())
        .current_dir(out.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("data error"));

    out.child("March 2024.csv").assert(predicate::path::missing());
}

#[test]
fn failure_is_reported_once() {
    let out = TempDir::new().unwrap();
    let assert = bill_split()
        .arg("-i")
        .arg(out.child("absent.yaml").path())
        .current_dir(out.path())
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.matches("absent.yaml").count(), 1, "{stderr}");
    assert!(stderr.starts_with("Error: data error"), "{stderr}");
}

#[test]
fn single_period_is_rejected() {
    let out = TempDir::new().unwrap();
    let input = out.child("bills.yaml");
    input
        .write_str("March 2024:\n  readings:\n    Jack: 10\n  electric: 100\n")
        .unwrap();

    bill_split()
        .arg("-i")
        .arg(input.path())
        .arg("--no-csv")
        .assert()
        .failure()
        .stderr(contains("at least 2 periods"));
}
