//! Integration tests for the `garagem` CLI binary.
//!
//! These tests validate argument parsing, help output, and error handling
//! without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `garagem` binary with env isolation.
///
/// Clears all `GARAGEM_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn garagem_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("garagem");
    cmd.env("HOME", "/tmp/garagem-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/garagem-cli-test-nonexistent")
        .env_remove("GARAGEM_PROFILE")
        .env_remove("GARAGEM_PROJECT_URL")
        .env_remove("GARAGEM_ANON_KEY")
        .env_remove("GARAGEM_OUTPUT")
        .env_remove("GARAGEM_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = garagem_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    garagem_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("vehicle")
            .and(predicate::str::contains("leads"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    garagem_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("garagem"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = garagem_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_vehicles_list_no_config() {
    garagem_cmd()
        .args(["vehicles", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists -- it just renders the default config.
    garagem_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_path() {
    garagem_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_output_format() {
    let output = garagem_cmd()
        .args(["--output", "invalid", "vehicles", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_project_url() {
    garagem_cmd()
        .args([
            "--project-url",
            "not a url",
            "--anon-key",
            "key",
            "vehicles",
            "list",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn test_missing_anon_key() {
    garagem_cmd()
        .args(["--project-url", "https://example.supabase.co", "vehicles", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("anonymous key").or(predicate::str::contains("anon")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_vehicles_subcommands_exist() {
    garagem_cmd()
        .args(["vehicles", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_leads_subcommands_exist() {
    garagem_cmd()
        .args(["leads", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_vehicle_add_requires_fields() {
    let output = garagem_cmd().args(["vehicles", "add"]).output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("--brand") || text.contains("required"),
        "Expected missing-argument error:\n{text}"
    );
}

#[test]
fn test_mutations_require_login() {
    // With a reachable-looking config but no stored session, mutations
    // must fail fast with the login hint rather than attempt the request.
    garagem_cmd()
        .args([
            "--project-url",
            "https://example.supabase.co",
            "--anon-key",
            "anon",
            "--yes",
            "vehicles",
            "delete",
            "v1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("garagem login"));
}
