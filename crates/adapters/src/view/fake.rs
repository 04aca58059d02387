// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake view adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SelectionChange, ViewAdapter};
use dg_core::{ResourceId, TrackedResource};
use std::sync::{Arc, Mutex};

/// Recorded view call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    OpenConfirm { drafts: Vec<ResourceId> },
    CloseConfirm,
    RegisterUnload,
    UnregisterUnload,
    Select(SelectionChange),
}

#[derive(Default)]
struct FakeViewState {
    calls: Vec<ViewCall>,
    confirm_open: bool,
    unload_registered: bool,
}

/// Fake view adapter for testing
#[derive(Clone, Default)]
pub struct FakeViewAdapter {
    state: Arc<Mutex<FakeViewState>>,
}

impl FakeViewAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ViewCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    pub fn confirm_open(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .confirm_open
    }

    pub fn unload_registered(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .unload_registered
    }

    /// Number of times the confirmation surface was opened
    pub fn confirm_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ViewCall::OpenConfirm { .. }))
            .count()
    }

    /// Focus changes, in order
    pub fn selections(&self) -> Vec<SelectionChange> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Select(change) => Some(change),
                _ => None,
            })
            .collect()
    }
}

impl ViewAdapter for FakeViewAdapter {
    fn open_confirm(&self, drafts: &[TrackedResource]) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.confirm_open = true;
        state.calls.push(ViewCall::OpenConfirm {
            drafts: drafts.iter().map(|r| r.id.clone()).collect(),
        });
    }

    fn close_confirm(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.confirm_open = false;
        state.calls.push(ViewCall::CloseConfirm);
    }

    fn register_unload_prompt(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.unload_registered = true;
        state.calls.push(ViewCall::RegisterUnload);
    }

    fn unregister_unload_prompt(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.unload_registered = false;
        state.calls.push(ViewCall::UnregisterUnload);
    }

    fn select(&self, change: SelectionChange) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .push(ViewCall::Select(change));
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
