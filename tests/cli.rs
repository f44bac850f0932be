use std::fs;
use std::process::{Command, Output};

fn skillgate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skillgate"))
        .args(args)
        .env_remove("SKILLGATE_CONFIG")
        .output()
        .unwrap()
}

#[test]
fn missing_argument_prints_usage_and_exits_one() {
    let out = skillgate(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage: skillgate"));
    assert!(out.stdout.is_empty());
}

#[test]
fn nonexistent_path_exits_one() {
    let out = skillgate(&["/no/such/skill/dir"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr)
        .contains("Error: Path does not exist: /no/such/skill/dir"));
}

#[test]
fn clean_skill_exits_zero_with_json_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("scripts")).unwrap();
    fs::write(dir.path().join("scripts/ok.sh"), "echo hello\n").unwrap();

    let out = skillgate(&[dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["scan_type"], "static");
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["passed"], true);
}

#[test]
fn high_finding_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("scripts")).unwrap();
    fs::write(dir.path().join("scripts/run.py"), "os.system(\"ls\")\n").unwrap();

    let out = skillgate(&[dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["summary"]["high"], 1);
    assert_eq!(report["findings"][0]["severity"], "HIGH");
    assert_eq!(report["findings"][0]["content"], "os.system(\"ls\")");
}

#[test]
fn list_rules_as_json() {
    let out = skillgate(&["--list-rules"]);
    assert_eq!(out.status.code(), Some(0));
    let rules: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(rules
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == "SH-101" && r["severity"] == "MEDIUM"));
}

#[test]
fn bad_config_is_a_tool_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("gate.toml");
    fs::write(&config, "[rules]\ndisabled = [\"XX-1\"]\n").unwrap();

    let out = skillgate(&["--config", config.to_str().unwrap(), dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
}
