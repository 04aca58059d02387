// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dg_adapters::{ScriptedResourceApi, ScriptedResponse, SharedResourceList};
use dg_core::TrackedResource;
use std::time::Duration;
use tokio::time::Instant;

fn config(max_retries: u32) -> CleanupConfig {
    CleanupConfig {
        max_retries,
        backoff: Duration::from_secs(1),
        timeout: Duration::from_secs(5),
    }
}

fn tracked(ids: &[&str]) -> (SharedResourceList, Vec<ResourceId>) {
    let source = SharedResourceList::new(ids.iter().map(|id| TrackedResource::draft(*id)).collect());
    let ids = source.ids();
    (source, ids)
}

#[tokio::test(start_paused = true)]
async fn deletes_everything_in_one_round() {
    let (source, ids) = tracked(&["a", "b"]);
    let api = ScriptedResourceApi::new();

    let report = cleanup_all(api.clone(), source.clone(), ids, config(3)).await;

    assert_eq!(report.rounds, 1);
    assert_eq!(report.deleted.len(), 2);
    assert!(report.abandoned.is_empty());
    assert!(source.is_empty());
}

#[tokio::test(start_paused = true)]
async fn transport_failure_is_retried_after_backoff() {
    let (source, ids) = tracked(&["a", "b"]);
    let api = ScriptedResourceApi::new();
    api.script("a", ScriptedResponse::transport("offline"));
    api.script("a", ScriptedResponse::ok());

    let start = Instant::now();
    let report = cleanup_all(api.clone(), source.clone(), ids, config(3)).await;

    assert_eq!(report.rounds, 2);
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(api.calls_for(&ResourceId::new("a")), 2);
    assert_eq!(api.calls_for(&ResourceId::new("b")), 1);
    assert!(source.is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeout_is_retried() {
    let (source, ids) = tracked(&["slow"]);
    let api = ScriptedResourceApi::new();
    api.script("slow", ScriptedResponse::ok().after(Duration::from_secs(60)));
    api.script("slow", ScriptedResponse::ok());

    let report = cleanup_all(api, source, ids, config(1)).await;

    assert_eq!(report.rounds, 2);
    assert_eq!(report.deleted, vec![ResourceId::new("slow")]);
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_retries() {
    let (source, ids) = tracked(&["a"]);
    let api = ScriptedResourceApi::new();
    api.script("a", ScriptedResponse::transport("offline"));

    let report = cleanup_all(api.clone(), source.clone(), ids, config(2)).await;

    assert_eq!(report.rounds, 3);
    assert_eq!(api.calls_for(&ResourceId::new("a")), 3);
    assert_eq!(report.abandoned, vec![ResourceId::new("a")]);
    assert!(source.contains(&ResourceId::new("a")));
}

#[tokio::test(start_paused = true)]
async fn rejection_is_abandoned_immediately() {
    let (source, ids) = tracked(&["locked", "ok"]);
    let api = ScriptedResourceApi::new();
    api.script("locked", ScriptedResponse::reject(409, "locked"));

    let report = cleanup_all(api.clone(), source.clone(), ids, config(3)).await;

    assert_eq!(report.rounds, 1);
    assert_eq!(report.abandoned, vec![ResourceId::new("locked")]);
    assert_eq!(report.deleted, vec![ResourceId::new("ok")]);
    assert_eq!(source.ids(), vec![ResourceId::new("locked")]);
}

#[tokio::test(start_paused = true)]
async fn not_found_counts_as_deleted() {
    let (source, ids) = tracked(&["gone"]);
    let api = ScriptedResourceApi::new();
    api.script("gone", ScriptedResponse::reject(404, "not found"));

    let report = cleanup_all(api, source.clone(), ids, config(3)).await;

    assert_eq!(report.deleted, vec![ResourceId::new("gone")]);
    assert!(source.is_empty());
}

#[tokio::test(start_paused = true)]
async fn spawned_cleanup_runs_detached() {
    let (source, ids) = tracked(&["a"]);
    let api = ScriptedResourceApi::new();

    let handle = spawn_cleanup(api, source.clone(), ids, config(3)).unwrap();
    let report = handle.await.unwrap();

    assert_eq!(report.deleted.len(), 1);
    assert!(source.is_empty());
}

#[test]
fn spawn_outside_runtime_is_skipped() {
    let (source, ids) = tracked(&["a"]);

    assert!(spawn_cleanup(ScriptedResourceApi::new(), source.clone(), ids, config(3)).is_none());
    assert_eq!(source.len(), 1);
}
