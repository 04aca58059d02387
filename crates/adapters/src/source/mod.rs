// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source of truth for the tracked collection
//!
//! The caller owns the list. The coordinator reads snapshots of it and
//! proposes removals; it never writes entries.

use dg_core::{ResourceId, TrackedResource};
use std::sync::{Arc, Mutex};

/// Caller-owned tracked collection
pub trait ResourceSource: Clone + Send + Sync + 'static {
    /// Snapshot of the current collection
    fn list_tracked(&self) -> Vec<TrackedResource>;

    /// Remove entries by id; ids not present are ignored
    fn remove(&self, ids: &[ResourceId]);
}

/// In-memory shared list
#[derive(Clone, Default)]
pub struct SharedResourceList {
    resources: Arc<Mutex<Vec<TrackedResource>>>,
}

impl SharedResourceList {
    pub fn new(resources: Vec<TrackedResource>) -> Self {
        Self {
            resources: Arc::new(Mutex::new(resources)),
        }
    }

    /// Append an entry, as the surrounding view would when a draft is created
    pub fn insert(&self, resource: TrackedResource) {
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|r| &r.id == id)
    }

    pub fn ids(&self) -> Vec<ResourceId> {
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }
}

impl ResourceSource for SharedResourceList {
    fn list_tracked(&self) -> Vec<TrackedResource> {
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn remove(&self, ids: &[ResourceId]) {
        if ids.is_empty() {
            return;
        }
        self.resources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|r| !ids.contains(&r.id));
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
