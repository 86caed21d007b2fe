//! Tests for CLI argument parsing, run against the built binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn energy_dialog_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_energy-dialog"));
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--preferences")
        .arg(dir.path().join("energy.json"));
    cmd
}

fn write_preferences(dir: &TempDir) {
    fs::write(
        dir.path().join("energy.json"),
        r#"{"device_consumption": [
            {"stat_consumption": "sensor.fridge_energy"},
            {"stat_consumption": "sensor.oven_energy"}
        ]}"#,
    )
    .expect("Failed to write preferences");
}

#[test]
fn test_help_lists_devices_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_energy-dialog"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("devices"));
    assert!(stdout.contains("--preferences"));
}

#[test]
fn test_devices_prints_one_id_per_line() {
    let dir = TempDir::new().unwrap();
    write_preferences(&dir);

    let output = energy_dialog_cmd(&dir)
        .arg("devices")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["sensor.fridge_energy", "sensor.oven_energy"]
    );
}

#[test]
fn test_devices_json_prints_preferences() {
    let dir = TempDir::new().unwrap();
    write_preferences(&dir);

    let output = energy_dialog_cmd(&dir)
        .args(["devices", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("devices --json is valid JSON");
    assert_eq!(
        value["device_consumption"][1]["stat_consumption"],
        "sensor.oven_energy"
    );
}

#[test]
fn test_devices_with_no_preferences_prints_nothing() {
    let dir = TempDir::new().unwrap();

    let output = energy_dialog_cmd(&dir)
        .arg("devices")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_config_exits_with_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[energy]\nunits = []\n").unwrap();

    let output = energy_dialog_cmd(&dir)
        .arg("devices")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading configuration"));
}
