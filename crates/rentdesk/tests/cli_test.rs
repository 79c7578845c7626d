//! Integration tests for the `rentdesk` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling -- all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `rentdesk` binary with env isolation.
///
/// Clears all `RENTDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn rentdesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rentdesk");
    cmd.env("HOME", "/tmp/rentdesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/rentdesk-cli-test-nonexistent")
        .env_remove("RENTDESK_PROFILE")
        .env_remove("RENTDESK_SERVER")
        .env_remove("RENTDESK_USERNAME")
        .env_remove("RENTDESK_PASSWORD")
        .env_remove("RENTDESK_OUTPUT")
        .env_remove("RENTDESK_INSECURE")
        .env_remove("RENTDESK_TIMEOUT");
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
    let output = rentdesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rentdesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("rental business")
            .and(predicate::str::contains("requests"))
            .and(predicate::str::contains("kyc"))
            .and(predicate::str::contains("calendar"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    rentdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rentdesk"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    rentdesk_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    rentdesk_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = rentdesk_cmd().arg("foobar").output().unwrap();
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
fn test_requests_list_without_config_fails() {
    let output = rentdesk_cmd().args(["requests", "list"]).output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure without config or flags"
    );
}

#[test]
fn test_calendar_set_requires_rule_type() {
    // No --discount and no --blackout: rejected before any network call.
    let output = rentdesk_cmd()
        .args([
            "--server",
            "http://localhost:1",
            "--username",
            "desk",
            "calendar",
            "set",
            "2026-01-01",
        ])
        .env("RENTDESK_PASSWORD", "x")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("--discount") || text.contains("--blackout"),
        "Expected rule-type guidance:\n{text}"
    );
}

#[test]
fn test_calendar_set_rejects_conflicting_rules() {
    let output = rentdesk_cmd()
        .args([
            "calendar",
            "set",
            "2026-01-01",
            "--discount",
            "20",
            "--blackout",
        ])
        .output()
        .unwrap();
    // Clap enforces the conflict itself: usage error, exit code 2.
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_calendar_set_rejects_bad_date() {
    let output = rentdesk_cmd()
        .args([
            "--server",
            "http://localhost:1",
            "--username",
            "desk",
            "calendar",
            "set",
            "christmas",
            "--blackout",
        ])
        .env("RENTDESK_PASSWORD", "x")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("YYYY-MM-DD"),
        "Expected date-format guidance:\n{text}"
    );
}

#[test]
fn test_config_profiles_with_no_config() {
    rentdesk_cmd()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_config_use_unknown_profile() {
    let output = rentdesk_cmd()
        .args(["config", "use", "nonexistent"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
