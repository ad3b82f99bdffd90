#![allow(clippy::unwrap_used)]
//! Integration tests for the `sin` commands, driven through `execute` with
//! in-memory streams.

use std::fs;
use std::io::Cursor;

use clap::Parser;
use sin_cli::cli::{Cli, execute};
use tempfile::TempDir;

fn run(args: &[&str], stdin: &str) -> (anyhow::Result<()>, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    let result = execute(&cli.command, &mut input, &mut out, false, false);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_check_valid_value() {
    let (result, out) = run(&["sin", "check", "046454286"], "");
    assert!(result.is_ok());
    assert_eq!(out, "046454286: Valid SIN Number... \n");
}

#[test]
fn test_check_invalid_value_fails_with_reason() {
    let (result, out) = run(&["sin", "check", "046454286", "123456789"], "");
    let err = result.unwrap_err().to_string();
    assert_eq!(err, "1 invalid SIN number(s)");
    assert!(out.contains("123456789: Invalid SIN Number...  (Checksum mismatch"));
}

#[test]
fn test_check_lenient_grouped_value() {
    let (strict, _) = run(&["sin", "check", "046 454 286"], "");
    assert!(strict.is_err());

    let (lenient, out) = run(&["sin", "check", "--lenient", "046 454 286"], "");
    assert!(lenient.is_ok());
    assert!(out.contains("Valid SIN Number"));
}

#[test]
fn test_check_json_output() {
    let (result, out) = run(&["sin", "check", "--json", "046454286"], "");
    assert!(result.is_ok());
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["validity"], "valid");
    assert_eq!(json[0]["display_text"], " Valid SIN Number... ");
    assert!(json[0].get("error").is_none());
}

#[test]
fn test_session_replays_stdin() {
    let (result, out) = run(&["sin", "session"], "046454286\n123456789\n");
    assert!(result.is_ok());
    assert_eq!(out, " Valid SIN Number... \n Invalid SIN Number... \n");
}

#[test]
fn test_scan_directory_json_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sins.txt"), "046454286\n130692544\n").unwrap();
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&["sin", "scan", root, "--format", "json"], "");
    assert!(result.is_ok(), "got: {result:?}");
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["checked_values"], 2);
    assert_eq!(json["ok"], true);
}

#[test]
fn test_scan_reports_failure() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sins.txt"), "123456789\n").unwrap();
    let root = tmp.path().to_str().unwrap();

    let (result, out) = run(&["sin", "scan", root], "");
    let err = result.unwrap_err().to_string();
    assert!(err.contains("1 invalid SIN number(s)"), "got: {err}");
    assert!(out.contains("INVALID SIN NUMBERS"));
}

#[test]
fn test_scan_missing_path() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let (result, _) = run(&["sin", "scan", missing.to_str().unwrap()], "");
    assert!(result.unwrap_err().to_string().contains("does not exist"));
}
