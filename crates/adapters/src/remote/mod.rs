// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote resource API adapters

mod noop;
mod scripted;

pub use noop::NoOpResourceApi;
pub use scripted::{RemoteCall, ScriptedOutcome, ScriptedResourceApi, ScriptedResponse};

use async_trait::async_trait;
use dg_core::ResourceId;
use thiserror::Error;

/// Errors from remote resource calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// No response: network-level failure
    #[error("transport failure: {0}")]
    Transport(String),
    /// The remote answered with an error status
    #[error("rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

impl RemoteError {
    pub fn not_found(id: &ResourceId) -> Self {
        RemoteError::Rejected {
            status: 404,
            detail: format!("{} not found", id),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Rejected { status: 404, .. })
    }
}

/// Adapter for the remote draft API
#[async_trait]
pub trait ResourceApi: Clone + Send + Sync + 'static {
    /// Promote a draft to its persisted state
    async fn save(&self, id: &ResourceId) -> Result<(), RemoteError>;

    /// Remove a draft
    async fn delete(&self, id: &ResourceId) -> Result<(), RemoteError>;
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
