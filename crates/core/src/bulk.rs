// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bulk operation outcomes and aggregate reports

use crate::resource::ResourceId;
use serde::{Deserialize, Serialize};

/// Operation applied to every draft in a bulk run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
    /// Promote drafts to their persisted state
    Save,
    /// Remove drafts
    Delete,
}

impl BulkOperation {
    pub fn name(&self) -> &'static str {
        match self {
            BulkOperation::Save => "save",
            BulkOperation::Delete => "delete",
        }
    }

    /// Past tense, for user-facing messages
    pub fn past_tense(&self) -> &'static str {
        match self {
            BulkOperation::Save => "saved",
            BulkOperation::Delete => "discarded",
        }
    }
}

impl std::fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a single operation within a bulk run settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded,
    Failed { reason: String },
    TimedOut,
}

/// A resource whose operation did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: ResourceId,
    pub reason: String,
    pub timed_out: bool,
}

/// Overall shape of a report, for choosing how to tell the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkSummary {
    /// Nothing was attempted
    Empty,
    AllSucceeded,
    Partial,
    AllFailed,
}

/// Aggregate result of a bulk run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    pub operation: BulkOperation,
    pub succeeded: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub succeeded_ids: Vec<ResourceId>,
    pub failures: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn empty(operation: BulkOperation) -> Self {
        Self {
            operation,
            succeeded: 0,
            failed: 0,
            timed_out: 0,
            succeeded_ids: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, id: ResourceId, outcome: OperationOutcome) {
        match outcome {
            OperationOutcome::Succeeded => {
                self.succeeded += 1;
                self.succeeded_ids.push(id);
            }
            OperationOutcome::Failed { reason } => {
                self.failed += 1;
                self.failures.push(BulkFailure {
                    id,
                    reason,
                    timed_out: false,
                });
            }
            OperationOutcome::TimedOut => {
                self.timed_out += 1;
                self.failures.push(BulkFailure {
                    id,
                    reason: "timed out".to_string(),
                    timed_out: true,
                });
            }
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.timed_out
    }

    /// Failed plus timed out
    pub fn unsuccessful(&self) -> usize {
        self.failed + self.timed_out
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn summary(&self) -> BulkSummary {
        match (self.succeeded, self.unsuccessful()) {
            (0, 0) => BulkSummary::Empty,
            (_, 0) => BulkSummary::AllSucceeded,
            (0, _) => BulkSummary::AllFailed,
            _ => BulkSummary::Partial,
        }
    }
}

impl std::fmt::Display for BulkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} succeeded, {} failed, {} timed out",
            self.operation, self.succeeded, self.failed, self.timed_out
        )
    }
}

#[cfg(test)]
#[path = "bulk_tests.rs"]
mod tests;
