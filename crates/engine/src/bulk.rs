// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel bulk save / delete with settle-all semantics

use crate::error::OperationError;
use dg_adapters::{ResourceApi, ResourceSource};
use dg_core::{
    BulkConfig, BulkOperation, BulkReport, OperationOutcome, ResourceId, TrackedResource,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;

/// Run one remote call per id and wait for every one of them to settle.
///
/// All calls are spawned before any is awaited. Each has its own deadline
/// of launch time plus `budget`. A call past its deadline is reported as
/// [`OperationError::Timeout`] and left running detached; its eventual
/// result is dropped.
pub(crate) async fn settle_all<A: ResourceApi>(
    api: &A,
    operation: BulkOperation,
    ids: Vec<ResourceId>,
    budget: Duration,
) -> Vec<(ResourceId, Result<(), OperationError>)> {
    let launched: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let api = api.clone();
            let call_id = id.clone();
            let deadline = Instant::now() + budget;
            let handle = tokio::spawn(async move {
                match operation {
                    BulkOperation::Save => api.save(&call_id).await,
                    BulkOperation::Delete => api.delete(&call_id).await,
                }
            });
            (id, deadline, handle)
        })
        .collect();

    let mut settled = Vec::with_capacity(launched.len());
    for (id, deadline, handle) in launched {
        let result = match tokio::time::timeout_at(deadline, handle).await {
            Ok(Ok(result)) => result.map_err(OperationError::from),
            Ok(Err(join_err)) => Err(OperationError::Transport(format!(
                "remote call aborted: {}",
                join_err
            ))),
            Err(_) => Err(OperationError::Timeout(budget)),
        };
        settled.push((id, result));
    }
    settled
}

/// Map a settled call onto the report's three buckets
fn classify(
    operation: BulkOperation,
    result: Result<(), OperationError>,
) -> OperationOutcome {
    match result {
        Ok(()) => OperationOutcome::Succeeded,
        // Already gone is as good as deleted
        Err(e) if operation == BulkOperation::Delete && e.is_not_found() => {
            OperationOutcome::Succeeded
        }
        Err(OperationError::Timeout(_)) => OperationOutcome::TimedOut,
        Err(e) => OperationOutcome::Failed {
            reason: e.to_string(),
        },
    }
}

/// Coordinates bulk save-all / discard-all
#[derive(Clone)]
pub struct BulkCoordinator<A, R> {
    api: A,
    source: R,
    config: BulkConfig,
}

impl<A: ResourceApi, R: ResourceSource> BulkCoordinator<A, R> {
    pub fn new(api: A, source: R, config: BulkConfig) -> Self {
        Self {
            api,
            source,
            config,
        }
    }

    /// Apply `operation` to every resource and report how each settled.
    ///
    /// Never fails as a whole. Succeeded ids are removed from the source.
    pub async fn run_bulk(
        &self,
        operation: BulkOperation,
        resources: &[TrackedResource],
    ) -> BulkReport {
        let span = tracing::info_span!("bulk.run", %operation, count = resources.len());

        async {
            if resources.is_empty() {
                tracing::debug!("nothing to do");
                return BulkReport::empty(operation);
            }

            let budget = self.config.timeout_for(operation);
            let ids = resources.iter().map(|r| r.id.clone()).collect();
            let start = std::time::Instant::now();
            let settled = settle_all(&self.api, operation, ids, budget).await;

            let mut report = BulkReport::empty(operation);
            for (id, result) in settled {
                let outcome = classify(operation, result);
                match &outcome {
                    OperationOutcome::Failed { reason } => {
                        tracing::warn!(id = %id, reason, "operation failed")
                    }
                    OperationOutcome::TimedOut => tracing::warn!(
                        id = %id,
                        budget_ms = budget.as_millis() as u64,
                        "operation timed out"
                    ),
                    OperationOutcome::Succeeded => {}
                }
                report.record(id, outcome);
            }

            self.source.remove(&report.succeeded_ids);

            tracing::info!(
                succeeded = report.succeeded,
                failed = report.failed,
                timed_out = report.timed_out,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "settled"
            );
            report
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "bulk_tests.rs"]
mod tests;
