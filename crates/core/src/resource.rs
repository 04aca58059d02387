// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked resources
//!
//! A tracked resource is one entry in the caller's source-of-truth list.
//! The coordinator only ever reads these, or proposes removal of whole
//! entries; it never edits a field.

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier for a tracked resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId(s.to_string())
    }
}

/// Lifecycle status of a resource
///
/// Only `Draft` counts as unsaved. Every other status is carried verbatim in
/// `Other` and treated as safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceStatus {
    Draft,
    Other(String),
}

impl ResourceStatus {
    pub fn other(status: impl Into<String>) -> Self {
        Self::from(status.into())
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, ResourceStatus::Draft)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResourceStatus::Draft => "draft",
            ResourceStatus::Other(s) => s,
        }
    }
}

impl From<String> for ResourceStatus {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("draft") {
            ResourceStatus::Draft
        } else {
            ResourceStatus::Other(s)
        }
    }
}

impl From<ResourceStatus> for String {
    fn from(status: ResourceStatus) -> Self {
        match status {
            ResourceStatus::Draft => "draft".to_string(),
            ResourceStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the tracked collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedResource {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub status: ResourceStatus,
    /// Domain fields passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TrackedResource {
    pub fn new(id: impl Into<ResourceId>, status: ResourceStatus) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            status,
            extra: serde_json::Map::new(),
        }
    }

    pub fn draft(id: impl Into<ResourceId>) -> Self {
        Self::new(id, ResourceStatus::Draft)
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_draft(&self) -> bool {
        self.status.is_draft()
    }

    /// Human label: display name when present, id otherwise
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
