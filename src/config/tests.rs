use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = HookConfig::load(None, temp_dir.path()).expect("Should load default config");

    assert_eq!(config, HookConfig::default());
    assert_eq!(config.project, "PracticeRoom.xcodeproj");
    assert_eq!(config.tool_timeout(), None);
}

#[test]
fn test_repo_config_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(REPO_CONFIG_FILE),
        "project = \"Other.xcodeproj\"\ntool_timeout_secs = 30\n",
    )
    .unwrap();

    let config = HookConfig::load(None, temp_dir.path()).unwrap();
    assert_eq!(config.project, "Other.xcodeproj");
    assert_eq!(config.tool_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn test_partial_repo_config_keeps_remaining_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(REPO_CONFIG_FILE), "tool_timeout_secs = 5\n").unwrap();

    let config = HookConfig::load(None, temp_dir.path()).unwrap();
    assert_eq!(config.project, "PracticeRoom.xcodeproj");
    assert_eq!(config.tool_timeout_secs, 5);
}

#[test]
fn test_custom_config_replaces_repo_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(REPO_CONFIG_FILE),
        "project = \"FromRepo.xcodeproj\"\n",
    )
    .unwrap();
    let custom = temp_dir.path().join("custom.toml");
    fs::write(&custom, "project = \"FromCustom.xcodeproj\"\n").unwrap();

    let config = HookConfig::load(Some(&custom), temp_dir.path()).unwrap();
    assert_eq!(config.project, "FromCustom.xcodeproj");
}

#[test]
fn test_missing_custom_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("non_existent.toml");

    let config = HookConfig::load(Some(&missing), temp_dir.path());
    assert!(config.is_ok(), "Should handle missing custom config gracefully");
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(REPO_CONFIG_FILE),
        "tool_timeout_secs = \"soon\"\n",
    )
    .unwrap();

    assert!(HookConfig::load(None, temp_dir.path()).is_err());
}
