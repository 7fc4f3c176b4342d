//! End-to-end tests for the `fmon` binary

mod common;

use common::FmonCommand;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_list_prints_sorted_tracked_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = fs::canonicalize(temp_dir.path()).unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs/guide.md"), b"").unwrap();
    fs::write(root.join("build.log"), b"").unwrap();
    fs::write(root.join(".DS_Store"), b"").unwrap();

    let result = FmonCommand::new(&root)
        .args(&["list", ".", "--ignore", "*.log"])
        .execute()
        .unwrap();
    result.assert_success();

    let lines: Vec<&str> = result.stdout.lines().collect();
    let expected = vec![
        root.join("docs").display().to_string(),
        root.join("docs/guide.md").display().to_string(),
    ];
    assert_eq!(lines, expected);
}

#[test]
fn test_list_missing_dir_fails() {
    let temp_dir = TempDir::new().unwrap();

    let result = FmonCommand::new(temp_dir.path())
        .args(&["list", "missing"])
        .execute()
        .unwrap();
    result.assert_failure();

    assert!(result.stderr.contains("Failed to resolve"));
}

#[test]
fn test_config_example_is_valid_toml() {
    let temp_dir = TempDir::new().unwrap();

    let result = FmonCommand::new(temp_dir.path())
        .args(&["config", "--example"])
        .execute()
        .unwrap();
    result.assert_success();

    let path = temp_dir.path().join("fmon.toml");
    fs::write(&path, &result.stdout).unwrap();
    let shown = FmonCommand::new(temp_dir.path())
        .args(&["config", "--config", path.to_str().unwrap()])
        .execute()
        .unwrap();
    shown.assert_success();

    assert!(shown.stdout.contains("channel_capacity = 256"));
}

#[test]
fn test_bad_config_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[watcher]\nchannel_capacity = \"lots\"\n").unwrap();

    let result = FmonCommand::new(temp_dir.path())
        .args(&["watch", ".", "--config", path.to_str().unwrap()])
        .execute()
        .unwrap();
    result.assert_failure();

    assert!(result.stderr.contains("Invalid config file"));
}
