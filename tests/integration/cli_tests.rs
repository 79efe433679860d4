use super::test_helpers::{get_binary_path, run_cli};
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_run_prints_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("script.json");
    let config = temp_dir.path().join("config.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "set_root", "path": "/home"},
            {"op": "present", "path": "/m", "style": "modal", "as": "m"},
            {"op": "pop", "steps": 3}
        ]"#,
    )
    .unwrap();

    let output = run_cli(&["run", script.to_str().unwrap(), "--json"], &config);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stacks = report["stacks"].as_array().unwrap();
    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[0]["alias"], "main");
    assert_eq!(stacks[1]["alias"], "m");
    assert_eq!(stacks[1]["back_stack"], serde_json::json!(["/m"]));
    assert_eq!(report["active"], stacks[1]["id"]);
    assert_eq!(report["failures"].as_array().unwrap().len(), 1);
}

#[test]
fn test_run_rejects_malformed_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("script.json");
    let config = temp_dir.path().join("config.json");
    std::fs::write(&script, r#"[{"op": "warp"}]"#).unwrap();

    let output = run_cli(&["run", script.to_str().unwrap()], &config);
    assert!(!output.status.success());
}

#[test]
fn test_config_round_trip_through_cli() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");

    assert!(run_cli(&["config", "init"], &config).status.success());
    assert!(config.exists());
    assert!(!run_cli(&["config", "init"], &config).status.success());

    let set = run_cli(
        &["config", "set", "presentation.default_sheet_height", "420"],
        &config,
    );
    assert!(set.status.success());

    let get = run_cli(&["config", "get", "presentation.default_sheet_height"], &config);
    assert!(get.status.success());
    assert!(String::from_utf8_lossy(&get.stdout).contains("420"));

    let unknown = run_cli(&["config", "get", "presentation.nonsense"], &config);
    assert!(!unknown.status.success());
}

#[test]
fn test_version_command() {
    let output = Command::new(get_binary_path())
        .arg("version")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
