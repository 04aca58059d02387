// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted resource API
//!
//! Deterministic in-memory stand-in for the remote API, used by the
//! simulator and by tests. Each id can be given a queue of responses;
//! the last queued response repeats. Unscripted calls succeed, except that
//! a resource deleted once answers `404` afterwards, as a real server would.

use super::{RemoteError, ResourceApi};
use async_trait::async_trait;
use dg_core::{BulkOperation, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a scripted call answers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScriptedOutcome {
    #[default]
    Ok,
    Reject {
        status: u16,
        #[serde(default)]
        detail: String,
    },
    Transport {
        #[serde(default)]
        message: String,
    },
}

/// One scripted answer, optionally delayed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptedResponse {
    #[serde(flatten)]
    pub outcome: ScriptedOutcome,
    #[serde(default, with = "humantime_serde")]
    pub delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn reject(status: u16, detail: impl Into<String>) -> Self {
        Self {
            outcome: ScriptedOutcome::Reject {
                status,
                detail: detail.into(),
            },
            delay: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            outcome: ScriptedOutcome::Transport {
                message: message.into(),
            },
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn into_result(self) -> Result<(), RemoteError> {
        match self.outcome {
            ScriptedOutcome::Ok => Ok(()),
            ScriptedOutcome::Reject { status, detail } => {
                Err(RemoteError::Rejected { status, detail })
            }
            ScriptedOutcome::Transport { message } => Err(RemoteError::Transport(message)),
        }
    }
}

/// Recorded remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub operation: BulkOperation,
    pub id: ResourceId,
}

type ScriptKey = (Option<BulkOperation>, ResourceId);

#[derive(Default)]
struct ScriptState {
    scripts: HashMap<ScriptKey, VecDeque<ScriptedResponse>>,
    deleted: HashSet<ResourceId>,
}

/// Scripted resource API
#[derive(Clone, Default)]
pub struct ScriptedResourceApi {
    state: Arc<Mutex<ScriptState>>,
    calls: Arc<Mutex<Vec<RemoteCall>>>,
    completed: Arc<Mutex<Vec<RemoteCall>>>,
}

impl ScriptedResourceApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for any operation on `id`
    pub fn script(&self, id: impl Into<ResourceId>, response: ScriptedResponse) -> &Self {
        self.push_script((None, id.into()), response);
        self
    }

    /// Queue a response for one operation on `id`; takes precedence over
    /// responses scripted for any operation
    pub fn script_for(
        &self,
        operation: BulkOperation,
        id: impl Into<ResourceId>,
        response: ScriptedResponse,
    ) -> &Self {
        self.push_script((Some(operation), id.into()), response);
        self
    }

    /// Calls in the order they were issued
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Calls in the order they finished, including ones nobody waited for
    pub fn completed(&self) -> Vec<RemoteCall> {
        self.completed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn calls_for(&self, id: &ResourceId) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| &c.id == id)
            .count()
    }

    pub fn is_deleted(&self, id: &ResourceId) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .deleted
            .contains(id)
    }

    fn push_script(&self, key: ScriptKey, response: ScriptedResponse) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .scripts
            .entry(key)
            .or_default()
            .push_back(response);
    }

    /// Next scripted response; the last one in a queue is sticky
    fn next_response(&self, operation: BulkOperation, id: &ResourceId) -> Option<ScriptedResponse> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        for key in [(Some(operation), id.clone()), (None, id.clone())] {
            if let Some(queue) = state.scripts.get_mut(&key) {
                let response = if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                };
                if response.is_some() {
                    return response;
                }
            }
        }
        None
    }

    async fn call(&self, operation: BulkOperation, id: &ResourceId) -> Result<(), RemoteError> {
        let call = RemoteCall {
            operation,
            id: id.clone(),
        };
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.clone());

        let response = self.next_response(operation, id);
        if let Some(delay) = response.as_ref().and_then(|r| r.delay) {
            tokio::time::sleep(delay).await;
        }

        let result = match response {
            Some(response) => response.into_result(),
            None if self.is_deleted(id) => Err(RemoteError::not_found(id)),
            None => Ok(()),
        };

        if result.is_ok() && operation == BulkOperation::Delete {
            self.state
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .deleted
                .insert(id.clone());
        }
        self.completed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);

        result
    }
}

#[async_trait]
impl ResourceApi for ScriptedResourceApi {
    async fn save(&self, id: &ResourceId) -> Result<(), RemoteError> {
        self.call(BulkOperation::Save, id).await
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), RemoteError> {
        self.call(BulkOperation::Delete, id).await
    }
}

#[cfg(test)]
#[path = "scripted_tests.rs"]
mod tests;
