//! Integration tests for the CLI application
//!
//! These tests run the diagnostic binary on small random problems.

use std::process::{Command, Output};
use svm_loss::ComparisonReport;
use tempfile::TempDir;

/// Get the path to the compiled CLI binary
fn get_cli_binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_svm-loss")
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(get_cli_binary_path())
        .args(args)
        .output()
        .expect("Failed to run CLI")
}

const SMALL_PROBLEM: [&str; 8] = ["-n", "40", "--dims", "12", "-c", "5", "--seed", "3"];

#[test]
fn test_cli_compare_command() {
    let mut args = vec!["compare"];
    args.extend_from_slice(&SMALL_PROBLEM);
    let output = run_cli(&args);

    assert!(
        output.status.success(),
        "Compare command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Hinge Loss Comparison ==="));
    assert!(stdout.contains("Problem: N=40, D=12, C=5"));
    assert!(stdout.contains("strategies agree"));
}

#[test]
fn test_cli_compare_saves_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");
    let report_str = report_path.to_str().unwrap();

    let mut args = vec!["compare"];
    args.extend_from_slice(&SMALL_PROBLEM);
    args.extend_from_slice(&["--reg", "2.5", "--output", report_str]);
    let output = run_cli(&args);

    assert!(
        output.status.success(),
        "Compare command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(report_path.exists(), "Report file was not created");

    let report = ComparisonReport::load_from_file(&report_path).expect("Failed to load report");
    assert_eq!(report.metadata.shape.n, 40);
    assert_eq!(report.metadata.shape.d, 12);
    assert_eq!(report.metadata.shape.c, 5);
    assert_eq!(report.metadata.reg, 2.5);
    assert_eq!(report.metadata.seed, Some(3));
    assert!(report.losses.difference < 1e-7);

    // The info command reads the same file back
    let output = run_cli(&["info", report_str]);
    assert!(
        output.status.success(),
        "Info command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Regularization: 2.5"));
}

#[test]
fn test_cli_gradcheck_command() {
    for strategy in ["naive", "vectorized"] {
        let mut args = vec!["gradcheck", "--strategy", strategy, "--num-checks", "5"];
        args.extend_from_slice(&SMALL_PROBLEM);
        let output = run_cli(&args);

        assert!(
            output.status.success(),
            "Gradcheck command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(&format!("=== Gradient Check ({strategy}) ===")));
        assert_eq!(stdout.lines().filter(|l| l.starts_with('(')).count(), 5);
        assert!(stdout.contains("Result: passed"));
    }
}

#[test]
fn test_cli_gradcheck_fails_with_regularization() {
    // The penalty gradient is reg * W, so a strong penalty breaks the check
    let mut args = vec!["gradcheck", "--reg", "1e4", "--weight-scale", "0.01"];
    args.extend_from_slice(&SMALL_PROBLEM);
    let output = run_cli(&args);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Result: FAILED"));
}

#[test]
fn test_cli_invalid_parameters() {
    let output = run_cli(&["compare", "-n", "0", "--dims", "4", "-c", "3"]);
    assert!(!output.status.success());

    let output = run_cli(&["compare", "-n", "4", "--dims", "4", "-c", "3", "--reg=-1"]);
    assert!(!output.status.success());

    let output = run_cli(&["gradcheck", "--strategy", "fancy"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_info_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.json");

    let output = run_cli(&["info", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("compare"));
    assert!(stdout.contains("gradcheck"));
    assert!(stdout.contains("info"));
}
