// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selection successor policy
//!
//! Decides what takes focus after the focused resource is removed.
//! Deterministic and side-effect free; the caller performs the switch.

use crate::resource::{ResourceId, TrackedResource};
use serde::{Deserialize, Serialize};

/// What should take focus next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Successor {
    /// Focus another tracked resource
    Resource(ResourceId),
    /// Nothing left to focus; navigate to the default listing
    Fallback,
}

/// Pick the successor for `removed`.
///
/// Priority: the first other draft in collection order, then the first
/// other resource of any status, then [`Successor::Fallback`]. `removed`
/// is skipped whether or not it is still present in `resources`.
pub fn pick_next(resources: &[TrackedResource], removed: &ResourceId) -> Successor {
    let mut others = resources.iter().filter(|r| &r.id != removed);

    let first_other = others.clone().next();
    if let Some(draft) = others.find(|r| r.is_draft()) {
        return Successor::Resource(draft.id.clone());
    }

    match first_other {
        Some(r) => Successor::Resource(r.id.clone()),
        None => Successor::Fallback,
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
