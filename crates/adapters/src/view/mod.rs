// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The view hosting a guarded workflow
//!
//! Covers what the coordinator asks of the surrounding UI: the exit
//! confirmation surface, the browser unload prompt, and focus changes.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeViewAdapter, ViewCall};

use dg_core::{ResourceId, TrackedResource};
use serde::Serialize;

/// Focus change requested after the focused resource was removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "to", rename_all = "snake_case")]
pub enum SelectionChange {
    Focus(ResourceId),
    /// Nothing left to focus; go to the default listing route
    Navigate(String),
}

/// Adapter for the hosting view
pub trait ViewAdapter: Clone + Send + Sync + 'static {
    /// Show the exit confirmation listing the unsaved drafts
    fn open_confirm(&self, drafts: &[TrackedResource]);

    fn close_confirm(&self);

    /// Install the "confirm before closing" browser prompt
    fn register_unload_prompt(&self);

    fn unregister_unload_prompt(&self);

    fn select(&self, change: SelectionChange);
}

/// View adapter that ignores every request
#[derive(Clone, Debug, Default)]
pub struct NoOpViewAdapter;

impl NoOpViewAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ViewAdapter for NoOpViewAdapter {
    fn open_confirm(&self, _drafts: &[TrackedResource]) {}

    fn close_confirm(&self) {}

    fn register_unload_prompt(&self) {}

    fn unregister_unload_prompt(&self) {}

    fn select(&self, _change: SelectionChange) {}
}
