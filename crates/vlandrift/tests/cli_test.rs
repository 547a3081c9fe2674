//! Integration tests for the `vlandrift` CLI binary.
//!
//! Every test runs against capture directories and database files in a
//! temp dir, so no switch or HTTP endpoint is needed.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vlandrift` binary with env isolation.
fn vlandrift_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vlandrift");
    cmd.env("HOME", "/tmp/vlandrift-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vlandrift-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("VLANDRIFT_CONFIG")
        .env_remove("VLANDRIFT_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const DATABASE: &str = r#"{
    "accsw": {
        "ESW1": { "vlan-profile": "home-1", "override": { "infra": 102 } },
        "ESW2": { "vlan-profile": "home-1" }
    },
    "vlan-profiles": {
        "home-1": { "runt": 100, "infra": 200, "engineer": 300 }
    }
}"#;

const DRIFTED: &str = "term len 0\n\
    ESW1>show vlan-switch brief | inc active\n\
    1    default                          active    Fa1/0, Fa1/1\n\
    100  runt                             active\n\
    200  infra                            active\n\
    999  rogue                            active\n\
    1002 fddi-default                     active\n";

const COMPLIANT: &str = "term len 0\n\
    ESW2>show vlan-switch brief | inc active\n\
    100  runt                             active\n\
    200  infra                            active\n\
    300  engineer                         active\n";

/// Temp dir holding `intent.json` and `captures/{sw1,sw2}.txt`.
fn lab() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("intent.json"), DATABASE).unwrap();
    let captures = dir.path().join("captures");
    std::fs::create_dir(&captures).unwrap();
    std::fs::write(captures.join("sw1.txt"), DRIFTED).unwrap();
    std::fs::write(captures.join("sw2.txt"), COMPLIANT).unwrap();
    dir
}

fn lab_args(dir: &Path) -> Vec<String> {
    vec![
        "--database-file".into(),
        dir.join("intent.json").display().to_string(),
        "audit".into(),
        "--capture-dir".into(),
        dir.join("captures").display().to_string(),
    ]
}

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vlandrift_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vlandrift_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("audit")
            .and(predicate::str::contains("parse"))
            .and(predicate::str::contains("resolve")),
    );
}

#[test]
fn test_version_flag() {
    vlandrift_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vlandrift"));
}

#[test]
fn test_completions_bash() {
    vlandrift_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── parse ───────────────────────────────────────────────────────────

#[test]
fn test_parse_plain_lists_active_vlans_by_id() {
    let dir = lab();
    vlandrift_cmd()
        .args(["-o", "plain", "parse"])
        .arg(dir.path().join("captures").join("sw1.txt"))
        .assert()
        .success()
        .stdout("100\trunt\n200\tinfra\n999\trogue\n");
}

#[test]
fn test_parse_json_includes_hostname() {
    let dir = lab();
    let output = vlandrift_cmd()
        .args(["-o", "json", "parse"])
        .arg(dir.path().join("captures").join("sw2.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let v = json_stdout(&output);
    assert_eq!(v["hostname"], "ESW2");
    assert_eq!(v["vlans"]["engineer"], 300);
}

#[test]
fn test_parse_missing_file_is_not_found() {
    let output = vlandrift_cmd()
        .args(["parse", "/tmp/vlandrift-cli-test-nonexistent/none.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── resolve ─────────────────────────────────────────────────────────

#[test]
fn test_resolve_applies_overrides() {
    let dir = lab();
    let output = vlandrift_cmd()
        .arg("--database-file")
        .arg(dir.path().join("intent.json"))
        .args(["-o", "json", "resolve", "ESW1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let v = json_stdout(&output);
    assert_eq!(v["profile"], "home-1");
    assert_eq!(v["overridden"], serde_json::json!(["infra"]));
    assert_eq!(v["vlans"]["infra"], 102);
    assert_eq!(v["vlans"]["runt"], 100);
}

#[test]
fn test_resolve_unknown_device_exits_4() {
    let dir = lab();
    vlandrift_cmd()
        .arg("--database-file")
        .arg(dir.path().join("intent.json"))
        .args(["resolve", "ESW9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ESW9"));
}

// ── audit ───────────────────────────────────────────────────────────

#[test]
fn test_audit_reports_findings_as_json() {
    let dir = lab();
    let output = vlandrift_cmd()
        .args(["-o", "json"])
        .args(lab_args(dir.path()))
        .args(["sw1", "sw2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let v = json_stdout(&output);
    assert_eq!(v["cancelled"], false);

    let sw1 = &v["results"]["sw1"];
    assert_eq!(sw1["hostname"], "ESW1");
    let kinds: Vec<&str> = sw1["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["missing", "mismatch", "unauthorized"]);

    assert_eq!(v["results"]["sw2"]["findings"], serde_json::json!([]));
    assert_eq!(v["results"]["sw2"]["error"], Value::Null);
}

#[test]
fn test_audit_table_has_summary() {
    let dir = lab();
    vlandrift_cmd()
        .args(lab_args(dir.path()))
        .args(["sw1", "sw2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 device(s) audited")
                .and(predicate::str::contains("1 with drift"))
                .and(predicate::str::contains("rogue")),
        );
}

#[test]
fn test_audit_fail_on_drift_exits_10() {
    let dir = lab();
    vlandrift_cmd()
        .args(lab_args(dir.path()))
        .args(["--fail-on-drift", "sw1"])
        .assert()
        .code(10);
}

#[test]
fn test_audit_compliant_device_passes_fail_on_drift() {
    let dir = lab();
    vlandrift_cmd()
        .args(lab_args(dir.path()))
        .args(["--fail-on-drift", "sw2"])
        .assert()
        .success();
}

#[test]
fn test_audit_missing_capture_is_a_device_error() {
    let dir = lab();
    let output = vlandrift_cmd()
        .args(["-o", "json"])
        .args(lab_args(dir.path()))
        .args(["sw2", "sw3"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let v = json_stdout(&output);
    assert_eq!(v["results"]["sw3"]["error"]["kind"], "retrieval");
    assert_eq!(v["results"]["sw2"]["error"], Value::Null);
}

#[test]
fn test_audit_reads_devices_file() {
    let dir = lab();
    let list = dir.path().join("devices.txt");
    std::fs::write(&list, "# lab switches\nsw1\n\nsw2\n").unwrap();

    let output = vlandrift_cmd()
        .args(["-o", "json"])
        .args(lab_args(dir.path()))
        .arg("--devices-file")
        .arg(&list)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let v = json_stdout(&output);
    assert_eq!(v["results"].as_object().unwrap().len(), 2);
}

#[test]
fn test_audit_without_database_is_usage_error() {
    let dir = lab();
    vlandrift_cmd()
        .args(["audit", "--capture-dir"])
        .arg(dir.path().join("captures"))
        .arg("sw1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No intended-state database configured"));
}

#[test]
fn test_audit_zero_timeout_is_usage_error() {
    let dir = lab();
    vlandrift_cmd()
        .args(lab_args(dir.path()))
        .args(["--timeout", "0", "sw1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("defaults.timeout"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    vlandrift_cmd()
        .args(["--config", "/tmp/vlandrift-cli-test/custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    vlandrift_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    let output = vlandrift_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let v = json_stdout(&output);
    assert_eq!(v["defaults"]["concurrency"], 8);
    assert_eq!(v["collector"]["command"][0], "ssh");

    vlandrift_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exists"));
}
