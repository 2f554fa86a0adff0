//! CLI integration tests for gleans-data.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const TEST_TIMEOUT_SECS: u64 = 30;

fn gleans_data() -> Command {
    let mut cmd = Command::cargo_bin("gleans-data").unwrap();
    cmd.timeout(Duration::from_secs(TEST_TIMEOUT_SECS));
    cmd
}

#[test]
fn test_help_flag() {
    gleans_data()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("glean derivation engine"));
}

#[test]
fn test_missing_args_fails() {
    gleans_data().assert().failure();
}

#[test]
fn test_nonexistent_input_file_fails_with_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");
    gleans_data()
        .arg(dir.path().join("no-such-invoices.csv"))
        .arg(dir.path().join("no-such-line-items.csv"))
        .arg(&output)
        .assert()
        .failure();
}

#[test]
fn test_end_to_end_produces_expected_gleans() {
    let dir = TempDir::new().unwrap();
    let invoices_path = dir.path().join("invoices.csv");
    let line_items_path = dir.path().join("line_items.csv");
    let output_path = dir.path().join("gleans.csv");

    fs::write(
        &invoices_path,
        "invoice_id,canonical_vendor_id,invoice_date,due_date,period_start_date,period_end_date,total_amount\n\
         I1,V1,2020-01-01,,,,100\n\
         I2,V1,2020-05-15,,,,100\n",
    )
    .unwrap();
    fs::write(
        &line_items_path,
        "invoice_id,period_start_date,period_end_date\n",
    )
    .unwrap();

    gleans_data()
        .arg(&invoices_path)
        .arg(&line_items_path)
        .arg(&output_path)
        .assert()
        .success();

    let output = fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("glean_date,glean_text,glean_type,glean_location,invoice_id,canonical_vendor_id,glean_id"));
    assert!(output.contains("First new bill in 4.5 months from vendor V1"));
    assert!(output.contains("2020-05-15"));
}

#[test]
fn test_unparseable_date_is_dropped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let invoices_path = dir.path().join("invoices.csv");
    let line_items_path = dir.path().join("line_items.csv");
    let output_path = dir.path().join("gleans.csv");

    fs::write(
        &invoices_path,
        "invoice_id,canonical_vendor_id,invoice_date,due_date,period_start_date,period_end_date,total_amount\n\
         I1,V1,not-a-date,,,,100\n",
    )
    .unwrap();
    fs::write(
        &line_items_path,
        "invoice_id,period_start_date,period_end_date\n",
    )
    .unwrap();

    gleans_data()
        .arg(&invoices_path)
        .arg(&line_items_path)
        .arg(&output_path)
        .assert()
        .success();

    let output = fs::read_to_string(&output_path).unwrap();
    // No detector can fire on a row with no usable invoice_date.
    assert_eq!(output.lines().count(), 1);
}
