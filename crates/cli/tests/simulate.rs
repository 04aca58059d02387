// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for `dg simulate`
//!
//! Each test mounts a session over a scenario file, attempts to leave,
//! and checks what the simulated user saw and where they ended up.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{dg, stdout_json, ScenarioFile, MIXED};
use predicates::prelude::*;

#[test]
fn test_save_all_then_leave() {
    let scenario = ScenarioFile::new(MIXED);

    dg().arg("simulate")
        .arg(&scenario.path)
        .args(["--choice", "save", "--to", "/dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unload prompt: on"))
        .stdout(predicate::str::contains("confirm: leave with 2 unsaved (a, b)?"))
        .stdout(predicate::str::contains("notice: [success] Saved 2 drafts"))
        .stdout(predicate::str::contains("save: 2 succeeded, 0 failed, 0 timed out"))
        .stdout(predicate::str::contains("location: /dashboard"))
        .stdout(predicate::str::contains("remaining: c"));
}

#[test]
fn test_discard_with_partial_failure_still_leaves() {
    let scenario = ScenarioFile::mixed_with(
        r#"
[[responses]]
id = "b"
steps = [{ outcome = "reject", status = 500, detail = "boom" }]
"#,
    );

    dg().arg("simulate")
        .arg(&scenario.path)
        .args(["--choice", "discard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notice: [success] Discarded 1 draft"))
        .stdout(predicate::str::contains(
            "notice: [warning] Could not delete 1 draft (1 failed)",
        ))
        .stdout(predicate::str::contains("b: rejected (500): boom"))
        .stdout(predicate::str::contains("location: /elsewhere"))
        .stdout(predicate::str::contains("remaining: b, c"));
}

#[test]
fn test_slow_save_times_out() {
    let scenario = ScenarioFile::mixed_with(
        r#"
[[responses]]
id = "a"
operation = "save"
steps = [{ outcome = "ok", delay = "5s" }]
"#,
    );

    dg().arg("simulate")
        .arg(&scenario.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("save: 1 succeeded, 0 failed, 1 timed out"))
        .stdout(predicate::str::contains("a: timed out"))
        .stdout(predicate::str::contains("location: /elsewhere"));
}

#[test]
fn test_stay_keeps_everything() {
    let scenario = ScenarioFile::new(MIXED);

    dg().arg("simulate")
        .arg(&scenario.path)
        .args(["--choice", "stay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirm: closed"))
        .stdout(predicate::str::contains("location: /resources/a"))
        .stdout(predicate::str::contains("remaining: a, b, c"))
        .stdout(predicate::str::contains("notice:").not());
}

#[test]
fn test_unmount_cleans_up_drafts() {
    let scenario = ScenarioFile::mixed_with(
        r#"
[[responses]]
id = "a"
steps = [{ outcome = "transport", message = "offline" }, { outcome = "ok" }]
"#,
    );

    dg().arg("simulate")
        .arg(&scenario.path)
        .args(["--choice", "unmount"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "cleanup: 2 deleted, 0 abandoned, 2 rounds",
        ))
        .stdout(predicate::str::contains("location: /resources/a"))
        .stdout(predicate::str::contains("remaining: c"));
}

#[test]
fn test_no_drafts_navigates_immediately() {
    let scenario = ScenarioFile::new(
        r#"
start = "/resources"

[[resources]]
id = "c"
status = "published"
"#,
    );

    dg().arg("simulate")
        .arg(&scenario.path)
        .args(["--to", "/away"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not guarded"))
        .stdout(predicate::str::contains("location: /away"))
        .stdout(predicate::str::contains("confirm:").not())
        .stdout(predicate::str::contains("unload prompt").not());
}

#[test]
fn test_json_output_is_a_single_document() {
    let scenario = ScenarioFile::new(MIXED);

    let json = stdout_json(
        dg().arg("simulate")
            .arg(&scenario.path)
            .args(["--choice", "discard", "--format", "json"]),
    );

    assert_eq!(json["choice"], "discard");
    assert_eq!(json["guarded"], true);
    assert_eq!(json["location"], "/elsewhere");
    similar_asserts::assert_eq!(json["remaining"], serde_json::json!(["c"]));
    assert_eq!(json["report"]["succeeded"], 2);
    let events: Vec<&str> = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    similar_asserts::assert_eq!(
        events,
        vec![
            "unload_prompt",
            "confirm_opened",
            "confirm_closed",
            "unload_prompt",
            "notice",
        ]
    );
}
