//! Binary-level end-to-end runs, with stub tools on a controlled PATH
//! and stub collaborator scripts in the working directory.

#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use common::{stderr, stdout, TestEnv};
use tempfile::TempDir;

const UNITS: [&str; 13] = [
    "create-resource-group",
    "create-storage-account",
    "create-virtual-network",
    "create-event-hubs",
    "resolve-monitoring-workspace",
    "create-monitoring",
    "create-cluster",
    "build-streaming-job",
    "submit-streaming-job",
    "create-test-clients",
    "report-throughput",
    "create-verification-workspace",
    "run-verification",
];

fn install(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A PATH directory where every required tool succeeds.
fn stub_tools() -> TempDir {
    let dir = TempDir::new().unwrap();
    for tool in ["az", "jq", "mvn", "kubectl", "helm"] {
        install(dir.path(), tool, "exit 0");
    }
    dir
}

/// Stub collaborator scripts under `<work_dir>/scripts`, the default
/// scripts directory.
fn stub_scripts(env: &TestEnv) {
    let dir = env.work_dir.path().join("scripts");
    fs::create_dir_all(&dir).unwrap();
    for unit in UNITS {
        install(&dir, unit, &format!("echo \"provisioning {unit}\""));
    }
    // The capture unit must print the workspace id; storage echoes its
    // derived name so the test can see the environment contract.
    install(&dir, "resolve-monitoring-workspace", "echo workspace-1234");
    install(
        &dir,
        "create-storage-account",
        "echo \"storage $AZURE_STORAGE_ACCOUNT in $LOCATION\"",
    );
}

#[test]
fn default_run_succeeds_end_to_end() {
    let env = TestEnv::new();
    let tools = stub_tools();
    stub_scripts(&env);

    let output = env.run_with_path(&["-n", "demo"], tools.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr:\n{}",
        stderr(&output)
    );
    assert!(env.log_exists());

    let log = fs::read_to_string(env.work_dir.path().join("streambench.log")).unwrap();
    assert!(log.contains("stage C (common resources)"));
    assert!(log.contains("storage demostorage in eastus"));
    assert!(log.contains("provisioning report-throughput"));
    // Default steps are CIPTM: verification is bound but skipped.
    assert!(log.contains("stage V (verification) skipped"));
    assert!(!log.contains("provisioning run-verification"));
}

#[test]
fn failing_collaborator_propagates_its_exit_code() {
    let env = TestEnv::new();
    let tools = stub_tools();
    stub_scripts(&env);
    install(
        &env.work_dir.path().join("scripts"),
        "create-cluster",
        "echo 'quota exceeded' >&2; exit 21",
    );

    let output = env.run_with_path(&["-n", "demo"], tools.path());

    assert_eq!(output.status.code(), Some(21));
    assert!(stderr(&output)
        .contains("stage P collaborator 'create-cluster' failed with exit code 21"));

    let log = fs::read_to_string(env.work_dir.path().join("streambench.log")).unwrap();
    assert!(log.contains("quota exceeded"));
    // Nothing past the failing unit ran.
    assert!(!log.contains("running submit-streaming-job"));
    assert!(!log.contains("running create-test-clients"));
}

#[test]
fn json_mode_emits_parseable_events() {
    let env = TestEnv::new();
    let tools = stub_tools();
    stub_scripts(&env);

    let output = env.run_with_path(&["-n", "demo", "-s", "C", "--json"], tools.path());

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect(line))
        .collect();

    assert_eq!(events.first().unwrap()["event"], "run_started");
    assert_eq!(events.first().unwrap()["names"]["storage_account"], "demostorage");
    assert_eq!(events.last().unwrap()["event"], "run_complete");
    assert!(events
        .iter()
        .any(|e| e["event"] == "stage_skipped" && e["letter"] == "V"));
}

#[test]
fn each_run_truncates_the_previous_log() {
    let env = TestEnv::new();
    let tools = stub_tools();
    stub_scripts(&env);

    let first = env.run_with_path(&["-n", "demo", "-s", "C"], tools.path());
    assert_eq!(first.status.code(), Some(0));

    let second = env.run_with_path(&["-n", "demo", "-s", "M"], tools.path());
    assert_eq!(second.status.code(), Some(0));

    let log = fs::read_to_string(env.work_dir.path().join("streambench.log")).unwrap();
    assert!(log.contains("stage M (metrics reporting)"));
    assert!(
        !log.contains("running create-resource-group"),
        "log should only describe the latest run:\n{log}"
    );
}
