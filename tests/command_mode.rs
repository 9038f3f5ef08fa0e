//! Integration tests for the non-interactive CLI.

use std::io::Write;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn sheet_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "=2+3*4"]);
    assert_eq!(stdout.trim(), "14");
    assert_eq!(code, 0);
}

#[test]
fn test_power_operator() {
    let (stdout, _, code) = run_command(&["-c", "=2^3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_literal_content_passes_through() {
    let (stdout, _, code) = run_command(&["-c", "hello"]);
    assert_eq!(stdout.trim(), "hello");
    assert_eq!(code, 0);
}

#[test]
fn test_division_by_zero_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "=1/0"]);
    assert_eq!(stdout.trim(), "#NUM!");
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_formula_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "=2+"]);
    assert_eq!(stdout.trim(), "#ERR!");
    assert_eq!(code, 1);
}

#[test]
fn test_get_resolves_references_from_file() {
    let file = sheet_file(r#"{"A1": "2", "B1": "=A1*21"}"#);
    let (stdout, _, code) = run_command(&[file.path().to_str().unwrap(), "-g", "B1"]);
    assert_eq!(stdout.trim(), "42");
    assert_eq!(code, 0);
}

#[test]
fn test_circular_reference_from_file() {
    let file = sheet_file(r#"{"A1": "=B1", "B1": "=A1"}"#);
    let (stdout, _, code) = run_command(&[file.path().to_str().unwrap(), "-g", "A1"]);
    assert_eq!(stdout.trim(), "#CYCLE!");
    assert_eq!(code, 1);
}

#[test]
fn test_set_feeds_command_evaluation() {
    let (stdout, _, code) = run_command(&["--set", "A1=5", "-c", "=A1+1"]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);
}

#[test]
fn test_set_formula_content_keeps_inner_equals() {
    let (stdout, _, code) = run_command(&["--set", "B1==2*3", "-g", "B1"]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);
}

#[test]
fn test_format_option() {
    let (stdout, _, code) = run_command(&[
        "--set",
        "A1==1/2",
        "--format",
        "A1=percentage",
        "-g",
        "A1",
    ]);
    assert_eq!(stdout.trim(), "50%");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_format_is_an_error() {
    let (_, stderr, code) = run_command(&["--set", "A1=1", "--format", "A1=roman"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown number format"));
}

#[test]
fn test_aggregate_over_file_data() {
    let file = sheet_file(r#"{"A1": "1", "A2": "2", "A3": "3"}"#);
    let (stdout, _, code) = run_command(&[file.path().to_str().unwrap(), "-c", "=SUM(A1:A3)"]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);
}

#[test]
fn test_default_action_prints_grid() {
    let file = sheet_file(r#"{"A1": "1", "B1": "=A1+1", "A2": "x"}"#);
    let (stdout, _, code) = run_command(&[file.path().to_str().unwrap()]);
    // B2 is unset, so the second row ends with an empty field.
    assert_eq!(stdout, "1\t2\nx\t\n");
    assert_eq!(code, 0);
}

#[test]
fn test_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let file = sheet_file(r#"{"A1": "=2*2", "B1": "label"}"#);

    let (_, _, code) = run_command(&[
        file.path().to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.trim_end(), "4,label");
}

#[test]
fn test_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("saved.json");

    let (_, _, code) = run_command(&[
        "--set",
        "A1=3",
        "--set",
        "B1==A1*2",
        "--save",
        saved.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_command(&[saved.to_str().unwrap(), "-g", "B1"]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_option_exits_with_usage() {
    let (_, stderr, code) = run_command(&["--bogus"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Unknown option"));
}
