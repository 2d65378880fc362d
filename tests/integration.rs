// Integration tests for the billgrade CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the billgrade binary.
fn billgrade() -> Command {
    Command::cargo_bin("billgrade").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    billgrade()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("billgrade"));
}

#[test]
fn cli_help_flag() {
    billgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade legislative bills"));
}

#[test]
fn grade_requires_path() {
    billgrade()
        .arg("grade")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn batch_requires_path() {
    billgrade()
        .arg("batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn override_requires_grade_or_clear() {
    billgrade()
        .args(["override", "TX-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn override_rejects_clear_with_grade() {
    billgrade()
        .args(["override", "TX-1", "--clear", "--grade", "B", "--score", "85"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unknown_methodology_is_rejected() {
    billgrade()
        .args(["--methodology", "astrology", "criteria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
