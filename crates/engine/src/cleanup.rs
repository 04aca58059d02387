// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort deletion of drafts left behind on unmount
//!
//! Runs detached from the session. Failures are logged, never shown.

use crate::bulk::settle_all;
use dg_adapters::{ResourceApi, ResourceSource};
use dg_core::{BulkOperation, CleanupConfig, ResourceId};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Result of a cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: Vec<ResourceId>,
    /// Ids given up on, after a rejection or once retries ran out
    pub abandoned: Vec<ResourceId>,
    pub rounds: u32,
}

/// Delete `ids` in concurrent rounds.
///
/// Timeouts and transport failures are retried after `config.backoff`, up
/// to `config.max_retries` extra rounds. Rejections are abandoned at once,
/// except 404 which counts as deleted.
pub async fn cleanup_all<A, R>(
    api: A,
    source: R,
    ids: Vec<ResourceId>,
    config: CleanupConfig,
) -> CleanupReport
where
    A: ResourceApi,
    R: ResourceSource,
{
    let mut report = CleanupReport::default();
    let mut remaining = ids;

    while !remaining.is_empty() {
        if report.rounds > 0 {
            tokio::time::sleep(config.backoff).await;
        }
        report.rounds += 1;
        let round = report.rounds;

        let settled = settle_all(&api, BulkOperation::Delete, remaining, config.timeout)
            .instrument(tracing::info_span!("cleanup.round", round))
            .await;

        let mut deleted = Vec::new();
        let mut retry = Vec::new();
        for (id, result) in settled {
            match result {
                Ok(()) => deleted.push(id),
                Err(e) if e.is_not_found() => deleted.push(id),
                Err(e) if e.is_retryable() && round <= config.max_retries => {
                    tracing::debug!(id = %id, round, error = %e, "cleanup will retry");
                    retry.push(id);
                }
                Err(e) => {
                    tracing::warn!(id = %id, round, error = %e, "cleanup abandoned");
                    report.abandoned.push(id);
                }
            }
        }

        source.remove(&deleted);
        report.deleted.extend(deleted);
        remaining = retry;
    }

    tracing::info!(
        deleted = report.deleted.len(),
        abandoned = report.abandoned.len(),
        rounds = report.rounds,
        "cleanup finished"
    );
    report
}

/// Fire-and-forget cleanup on the current runtime.
///
/// Returns `None` (and logs) when called outside a tokio runtime.
pub fn spawn_cleanup<A, R>(
    api: A,
    source: R,
    ids: Vec<ResourceId>,
    config: CleanupConfig,
) -> Option<JoinHandle<CleanupReport>>
where
    A: ResourceApi,
    R: ResourceSource,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            tracing::info!(count = ids.len(), "cleanup scheduled");
            Some(runtime.spawn(cleanup_all(api, source, ids, config)))
        }
        Err(_) => {
            tracing::warn!(count = ids.len(), "no async runtime, skipping cleanup");
            None
        }
    }
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
