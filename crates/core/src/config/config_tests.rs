// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn empty_document_uses_defaults() {
    let config = GuardConfig::from_toml_str("").unwrap();
    assert_eq!(config, GuardConfig::default());
    assert_eq!(config.bulk.save_timeout, Duration::from_secs(15));
    assert_eq!(config.bulk.delete_timeout, Duration::from_secs(10));
    assert_eq!(config.cleanup.max_retries, 3);
    assert_eq!(config.cleanup.backoff, Duration::from_secs(1));
}

#[test]
fn parses_humantime_durations() {
    let config = GuardConfig::from_toml_str(
        r#"
        fallback_route = "/batches"

        [bulk]
        save_timeout = "12s"
        delete_timeout = "500ms"

        [cleanup]
        max_retries = 5
        backoff = "2s"
        "#,
    )
    .unwrap();

    assert_eq!(config.fallback_route, "/batches");
    assert_eq!(config.bulk.timeout_for(BulkOperation::Save), Duration::from_secs(12));
    assert_eq!(
        config.bulk.timeout_for(BulkOperation::Delete),
        Duration::from_millis(500)
    );
    assert_eq!(config.cleanup.max_retries, 5);
    assert_eq!(config.cleanup.backoff, Duration::from_secs(2));
    // Unset field keeps its default
    assert_eq!(config.cleanup.timeout, Duration::from_secs(10));
}

#[test]
fn rejects_malformed_duration() {
    let err = GuardConfig::from_toml_str("[bulk]\nsave_timeout = \"soon\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fallback_route = \"/home\"").unwrap();

    let config = GuardConfig::load(file.path()).unwrap();
    assert_eq!(config.fallback_route, "/home");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("guard.toml");

    let err = GuardConfig::load(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("guard.toml"));
}

#[test]
fn builders_override_fields() {
    let config = GuardConfig::new()
        .with_fallback_route("/drafts")
        .with_save_timeout(Duration::from_secs(1))
        .with_delete_timeout(Duration::from_secs(2))
        .with_cleanup(1, Duration::from_millis(100));

    assert_eq!(config.fallback_route, "/drafts");
    assert_eq!(config.bulk.save_timeout, Duration::from_secs(1));
    assert_eq!(config.bulk.delete_timeout, Duration::from_secs(2));
    assert_eq!(config.cleanup.max_retries, 1);
    assert_eq!(config.cleanup.backoff, Duration::from_millis(100));
}
