//! Integration tests for the srcspot binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn replay_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

#[test]
fn test_check_host_development() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["check-host", "localhost:8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:8080: development"));
}

#[test]
fn test_check_host_production() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["check-host", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com: production"));
}

#[test]
fn test_check_host_force() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["check-host", "example.com", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("development"));
}

#[test]
fn test_check_host_force_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("srcspot.toml");
    std::fs::write(&config, "force_dev = true\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["check-host", "example.com", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com: development"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("srcspot.toml");
    std::fs::write(&config, "[tooltip]\nwidth = -5\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["check-host", "localhost", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_script_tag_variants() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["script-tag"])
        .assert()
        .success()
        .stdout("<script src=\"js/srcspot.js\"></script>\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["script-tag", "--base", "/app/"])
        .assert()
        .success()
        .stdout("<script src=\"/app/js/srcspot.js\"></script>\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["script-tag", "--host", "example.com"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_replay_scenario() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("replay")
        .arg(fixture("product_page.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = replay_lines(&output.stdout);
    // Six events plus the final status line
    assert_eq!(lines.len(), 7);

    assert_eq!(lines[0]["outcome"]["outcome"], "armed");

    let inspected = &lines[1]["outcome"];
    assert_eq!(inspected["outcome"], "inspected");
    assert_eq!(inspected["tag_name"], "span");
    assert_eq!(inspected["source"]["kind"], "annotated");
    assert_eq!(inspected["source"]["source"], "page.php:7");
    assert_eq!(inspected["source"]["inherited"], true);
    assert_eq!(inspected["source"]["parent_identifier"], "div.card");

    let copied = &lines[2];
    assert_eq!(copied["outcome"]["outcome"], "copied");
    assert_eq!(copied["outcome"]["method"], "clipboard_api");
    assert_eq!(copied["prevent_default"], true);
    assert_eq!(
        copied["outcome"]["text"],
        "URL: http://localhost:8080/shop/product\n\
         File: page.php:7 (inherited from div.card)\n\
         Element: <span>\n\
         Class: price"
    );

    let aside = &lines[3]["outcome"];
    assert_eq!(aside["source"]["kind"], "inferred");
    assert_eq!(aside["source"]["file"], "product.php");

    assert_eq!(lines[4]["outcome"]["outcome"], "reset");
    assert_eq!(lines[5]["outcome"]["outcome"], "ack_expired");
    assert_eq!(lines[6]["enabled"], true);
    assert_eq!(lines[6]["localhost"], true);
}

#[test]
fn test_replay_without_clipboard_api_uses_copy_command() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("replay")
        .arg(fixture("product_page.json"))
        .arg("--no-clipboard-api")
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = replay_lines(&output.stdout);
    assert_eq!(lines[2]["outcome"]["method"], "legacy_command");
}

#[test]
fn test_replay_respects_persisted_disable() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, r#"{ "srcspot.enabled": "false" }"#).unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("replay")
        .arg(fixture("product_page.json"))
        .arg("--state")
        .arg(&state)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = replay_lines(&output.stdout);
    assert!(lines[..6]
        .iter()
        .all(|l| l["outcome"]["outcome"] == "ignored" || l["outcome"]["outcome"] == "reset"));
    assert_eq!(lines[6]["enabled"], false);
}

#[test]
fn test_replay_toggle_event_writes_state_file() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    let scenario = dir.path().join("toggle.json");
    std::fs::write(
        &scenario,
        r#"{
  "href": "http://localhost/",
  "elements": [],
  "events": [
    { "type": "key_down", "key": "control" },
    { "type": "toggle", "value": false },
    { "type": "key_down", "key": "control" }
  ]
}"#,
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("replay")
        .arg(&scenario)
        .arg("--state")
        .arg(&state)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = replay_lines(&output.stdout);
    assert_eq!(lines[0]["outcome"]["outcome"], "armed");
    assert_eq!(lines[1]["outcome"]["outcome"], "toggled");
    assert_eq!(lines[1]["outcome"]["enabled"], false);
    assert_eq!(lines[2]["outcome"]["outcome"], "ignored");
    assert_eq!(lines[3]["enabled"], false);

    let persisted = std::fs::read_to_string(&state).unwrap();
    assert!(persisted.contains("\"srcspot.enabled\": \"false\""));
}

#[test]
fn test_replay_missing_scenario_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.args(["replay", "/nonexistent/scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load scenario"));
}

#[test]
fn test_lookup_inherited() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("lookup")
        .arg(fixture("product_page.json"))
        .args(["--at", "30,30"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["element"], "h1#brand");
    assert_eq!(report["source"]["source"], "layout.php:12");
    assert_eq!(report["source"]["parent_identifier"], "header.site-header");
}

#[test]
fn test_lookup_outside_page_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.arg("lookup")
        .arg(fixture("product_page.json"))
        .args(["--at", "5000,5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No element at 5000,5000"));
}

#[test]
fn test_toggle_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.arg("toggle")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\":false"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.arg("toggle")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\":true"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    cmd.arg("toggle")
        .arg("--state")
        .arg(&state)
        .arg("off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\":false"));

    let persisted = std::fs::read_to_string(&state).unwrap();
    assert!(persisted.contains("\"srcspot.enabled\": \"false\""));
}

#[test]
fn test_debug_output_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("srcspot");
    let output = cmd
        .arg("replay")
        .arg(fixture("product_page.json"))
        .arg("--debug")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("DEBUG") || stderr.contains("INFO"),
        "No tracing output found in stderr: {}",
        stderr
    );
}
