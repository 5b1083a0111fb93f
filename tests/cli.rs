//! Integration tests for the apierr CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn apierr() -> Command {
    let mut cmd = Command::cargo_bin("apierr").unwrap();
    cmd.env_remove("APIERR_INCLUDE_STACK");
    cmd
}

#[test]
fn test_make_not_found() {
    apierr()
        .args([
            "make",
            "not-found",
            "-m",
            "Widget missing",
            "--entity",
            "widget",
            "--key-path",
            "items.0.id",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"name":"not-found","message":"Widget missing","entity":"widget","keyPath":"items.0.id"}"#,
        ));
}

#[test]
fn test_make_uses_default_message() {
    apierr()
        .args(["make", "conflict"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"already-exists""#))
        .stdout(predicate::str::contains("Resource already exists."));
}

#[test]
fn test_make_text_shows_status_override() {
    apierr()
        .args(["make", "bad-request", "--status", "422", "-f", "text"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("422"))
        .stdout(predicate::str::contains("bad-request"));
}

#[test]
fn test_make_base_without_message_fails() {
    apierr()
        .args(["make", "api-error"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Message must be a string"));
}

#[test]
fn test_make_rejects_invalid_status() {
    apierr()
        .args(["make", "not-found", "--status", "42"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid status code: 42"));
}

#[test]
fn test_make_unknown_kind() {
    apierr().args(["make", "teapot"]).assert().failure();
}

#[test]
fn test_stack_hidden_by_default() {
    apierr()
        .args(["make", "internal-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stack").not());
}

#[test]
fn test_stack_included_on_request() {
    apierr()
        .args(["make", "internal-error", "--include-stack"])
        .env_remove("RUST_BACKTRACE")
        .env_remove("RUST_LIB_BACKTRACE")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""stack":[{"function":"#));
}

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("body.json");
    fs::write(
        &path,
        r#"{"name":"not-found","message":"Widget missing","keyPath":["items","0"]}"#,
    )
    .unwrap();

    apierr()
        .arg("parse")
        .arg(&path)
        .args(["--status", "404", "--origin", "serviceA", "-f", "text"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("404 not-found - Widget missing"))
        .stdout(predicate::str::contains("keyPath: items.0"))
        .stdout(predicate::str::contains("origin: serviceA"));
}

#[test]
fn test_parse_stdin() {
    apierr()
        .args(["parse", "--status", "503", "--origin", "billing"])
        .write_stdin(r#"{"message":"Down for maintenance"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"name":"service-unavailable","message":"Down for maintenance"}"#,
        ));
}

#[test]
fn test_parse_non_string_message_fails() {
    apierr()
        .args(["parse", "--status", "400", "--origin", "svc"])
        .write_stdin(r#"{"name":"bad-request","message":42}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("got a number"));
}

#[test]
fn test_parse_missing_file() {
    apierr()
        .args(["parse", "/nonexistent/body.json", "--status", "400", "--origin", "svc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_kinds_json() {
    apierr()
        .args(["kinds", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"too-many-requests""#))
        .stdout(predicate::str::contains(r#""statusCode":429"#))
        .stdout(predicate::str::contains(r#""kind":"api-error""#));
}
