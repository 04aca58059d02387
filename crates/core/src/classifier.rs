// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Draft classification
//!
//! The free functions are pure. [`DraftClassifier`] memoizes the derived
//! draft set so that an unchanged collection hands back the same `Arc`,
//! letting callers skip guard re-evaluation with a pointer comparison.

use crate::resource::{ResourceId, TrackedResource};
use std::sync::Arc;

pub fn is_draft(resource: &TrackedResource) -> bool {
    resource.is_draft()
}

pub fn draft_resources(resources: &[TrackedResource]) -> Vec<&TrackedResource> {
    resources.iter().filter(|r| is_draft(r)).collect()
}

pub fn draft_count(resources: &[TrackedResource]) -> usize {
    resources.iter().filter(|r| is_draft(r)).count()
}

/// Ids of the drafts in a collection, in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSet {
    ids: Vec<ResourceId>,
}

impl DraftSet {
    pub fn from_resources(resources: &[TrackedResource]) -> Self {
        Self {
            ids: draft_resources(resources)
                .into_iter()
                .map(|r| r.id.clone())
                .collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn has_unsaved(&self) -> bool {
        !self.ids.is_empty()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[ResourceId] {
        &self.ids
    }
}

/// Memoizing classifier
///
/// Keyed on the `(id, is_draft)` sequence: field changes that do not
/// affect draft status do not produce a new set.
#[derive(Debug, Default)]
pub struct DraftClassifier {
    key: Option<Vec<(ResourceId, bool)>>,
    current: Arc<DraftSet>,
    recomputations: u64,
}

impl DraftClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, resources: &[TrackedResource]) -> Arc<DraftSet> {
        if !self.matches(resources) {
            self.key = Some(
                resources
                    .iter()
                    .map(|r| (r.id.clone(), is_draft(r)))
                    .collect(),
            );
            self.current = Arc::new(DraftSet::from_resources(resources));
            self.recomputations += 1;
        }
        Arc::clone(&self.current)
    }

    /// Most recently computed set, without reclassifying
    pub fn current(&self) -> Arc<DraftSet> {
        Arc::clone(&self.current)
    }

    /// Number of times a fresh set had to be built
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    fn matches(&self, resources: &[TrackedResource]) -> bool {
        let Some(key) = &self.key else {
            return false;
        };
        key.len() == resources.len()
            && key
                .iter()
                .zip(resources)
                .all(|((id, draft), r)| *id == r.id && *draft == is_draft(r))
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
