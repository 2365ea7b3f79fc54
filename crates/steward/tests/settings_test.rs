//! Tests for layered settings.

use std::io::Write;
use steward::{Settings, StorageBackend};
use steward_provision::DuplicateChannelPolicy;
use tempfile::NamedTempFile;

fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_overrides_defaults() {
    let file = settings_file(
        r#"
[server]
bind = "127.0.0.1:9000"

[storage]
backend = "memory"

[platform]
channel_policy = "reuse"
"#,
    );

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.server.bind, "127.0.0.1:9000");
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
    assert_eq!(settings.platform.channel_policy, DuplicateChannelPolicy::Reuse);
    // Untouched keys keep their bundled values
    assert_eq!(settings.platform.requests_per_second, 5);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_zero_rate_rejected() {
    let file = settings_file("[platform]\nrequests_per_second = 0\n");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.reason().contains("requests_per_second"));
}

#[test]
fn test_unknown_policy_rejected() {
    let file = settings_file("[platform]\nchannel_policy = \"merge\"\n");
    assert!(Settings::from_file(file.path()).is_err());
}

#[test]
fn test_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(Settings::from_file(&missing).is_err());
}
