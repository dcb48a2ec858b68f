// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the `judge-cli` binary.

use assert_cmd::Command;
use predicates::str::contains;

fn judge_cli() -> Command {
    Command::cargo_bin("judge-cli").expect("binary `judge-cli` should be built")
}

#[test]
fn help_flag_prints_usage() {
    judge_cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Offline code-judging runner"))
        .stdout(contains("run"))
        .stdout(contains("schema"));
}

#[test]
fn version_flag_prints_version() {
    judge_cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn schema_subcommand_prints_request_and_response_shapes() {
    judge_cli()
        .arg("schema")
        .assert()
        .success()
        .stdout(contains("\"request\""))
        .stdout(contains("\"response\""));
}

#[test]
fn run_rejects_an_unknown_language() {
    judge_cli()
        .args([
            "run",
            "--language",
            "cobol",
            "--source",
            "/nonexistent/source.txt",
            "--function-name",
            "solve",
            "--tests",
            "/nonexistent/tests.json",
        ])
        .assert()
        .failure()
        .stderr(contains("unknown language"));
}

#[test]
fn run_reports_a_missing_source_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let tests_path = dir.path().join("tests.json");
    std::fs::write(&tests_path, "[]").expect("write tests file");

    judge_cli()
        .args([
            "run",
            "--language",
            "python",
            "--source",
            "/nonexistent/source.py",
            "--function-name",
            "solve",
            "--tests",
            tests_path.to_str().unwrap(),
        ])
        .assert()
        .failure();
}
