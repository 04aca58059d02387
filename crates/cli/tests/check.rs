// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for `dg check`

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{dg, stdout_json, ScenarioFile, MIXED};
use predicates::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn test_dg_help() {
    dg().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("navigation guarding"));
}

#[test]
fn test_dg_version() {
    dg().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dg"));
}

#[test]
fn test_check_lists_drafts() {
    let scenario = ScenarioFile::new(MIXED);

    dg().arg("check")
        .arg(&scenario.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tracked: 3"))
        .stdout(predicate::str::contains("drafts: 2 (a, b)"))
        .stdout(predicate::str::contains("guarding: on"));
}

#[test]
fn test_check_without_drafts_is_unguarded() {
    let scenario = ScenarioFile::new(
        r#"
[[resources]]
id = "c"
status = "published"
"#,
    );

    dg().arg("check")
        .arg(&scenario.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("drafts: 0"))
        .stdout(predicate::str::contains("guarding: off"));
}

#[test]
fn test_check_json() {
    let scenario = ScenarioFile::new(MIXED);

    let json = stdout_json(dg().args(["check", "--format", "json"]).arg(&scenario.path));

    assert_eq!(
        json,
        serde_json::json!({
            "tracked": 3,
            "drafts": ["a", "b"],
            "guarded": true,
        })
    );
}

#[test]
fn test_check_missing_file_fails() {
    dg().args(["check", "/nonexistent/scenario.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read scenario"));
}

#[test]
fn test_check_invalid_scenario_fails() {
    let scenario = ScenarioFile::new("resources = 3");

    dg().arg("check")
        .arg(&scenario.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scenario"));
}
