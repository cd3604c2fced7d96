//! Tests for loading configuration from disk.

use std::io::Write;
use strictly_reversi::MatchConfig;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "mailbox_capacity = 8").unwrap();
    writeln!(file, "log_filter = \"strictly_reversi=debug\"").unwrap();

    let config = MatchConfig::from_file(file.path()).expect("config loads");
    assert_eq!(*config.mailbox_capacity(), 8);
    assert_eq!(config.log_filter(), "strictly_reversi=debug");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = MatchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
