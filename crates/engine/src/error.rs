// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the guard engine

use dg_adapters::RemoteError;
use dg_core::ResourceId;
use std::time::Duration;
use thiserror::Error;

/// How one remote operation failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// No answer before the per-call budget ran out
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

impl OperationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OperationError::Rejected { status: 404, .. })
    }

    /// Timeouts and transport failures may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OperationError::Timeout(_) | OperationError::Transport(_)
        )
    }
}

impl From<RemoteError> for OperationError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport(message) => OperationError::Transport(message),
            RemoteError::Rejected { status, detail } => OperationError::Rejected { status, detail },
        }
    }
}

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no exit confirmation is open")]
    NotConfirming,
    #[error("an exit is already in progress")]
    ExitInProgress,
    #[error("an operation on {0} is already in flight")]
    Busy(ResourceId),
    #[error("{0} is not tracked")]
    NotTracked(ResourceId),
    /// The background exit task died; the exit was settled anyway
    #[error("exit task failed: {0}")]
    ExitTask(String),
    #[error("operation on {id} failed: {source}")]
    Operation {
        id: ResourceId,
        #[source]
        source: OperationError,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
