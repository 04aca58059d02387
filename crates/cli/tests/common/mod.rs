// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two drafts and one published resource
pub const MIXED: &str = r#"
start = "/resources/a"
focus = "a"

[guard.bulk]
save_timeout = "300ms"
delete_timeout = "300ms"

[guard.cleanup]
max_retries = 1
backoff = "10ms"
timeout = "300ms"

[[resources]]
id = "a"
status = "draft"

[[resources]]
id = "b"
status = "draft"

[[resources]]
id = "c"
status = "published"
"#;

/// A scenario file in its own temp directory
pub struct ScenarioFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl ScenarioFile {
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, content).expect("Failed to write scenario");
        Self { _dir: dir, path }
    }

    /// MIXED plus extra TOML appended
    pub fn mixed_with(extra: &str) -> Self {
        Self::new(&format!("{}\n{}", MIXED, extra))
    }
}

pub fn dg() -> Command {
    let mut cmd = Command::cargo_bin("dg").expect("dg binary");
    cmd.env_remove("DG_LOG");
    cmd
}

pub fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run dg");
    assert!(output.status.success(), "dg failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
