//! Integration tests that run the compiled CLI binary.

use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn lifecoord(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lifecoord"));
    cmd.arg("--config-dir").arg(config_dir.path());
    for var in [
        "AGENT_PORT_MAPPING",
        "API_GATEWAY_PORT",
        "API_GATEWAY_URL",
        "NANI_PORT",
        "BUCKY_PORT",
        "LUNA_PORT",
        "MILO_PORT",
        "LIFECOORD_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_agents_roster_follows_port_mapping() {
    let dir = TempDir::new().unwrap();
    let output = lifecoord(&dir)
        .env("AGENT_PORT_MAPPING", "swapped")
        .args(["agents", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let roster: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(roster["mapping"], "swapped");
    let milo = roster["agents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "milo")
        .unwrap();
    assert_eq!(milo["port"], 8003);
}

#[test]
fn test_submit_against_unreachable_gateway_reports_outcome() {
    let dir = TempDir::new().unwrap();
    let output = lifecoord(&dir)
        .args([
            "--gateway-url",
            "http://127.0.0.1:9",
            "workflow",
            "submit",
            "--type",
            "general_query",
            "--user",
            "u1",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["status"], "submission_failed");
}

#[test]
fn test_logging_is_silent_by_default() {
    let dir = TempDir::new().unwrap();
    let output = lifecoord(&dir).args(["config", "show", "nani"]).output().unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
