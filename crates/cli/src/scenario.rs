// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario files
//!
//! A scenario describes a mounted workflow: the guard configuration, the
//! tracked collection, and how the remote answers for each resource.
//!
//! ```toml
//! start = "/resources/a"
//! focus = "a"
//!
//! [guard.bulk]
//! save_timeout = "2s"
//!
//! [[resources]]
//! id = "a"
//! status = "draft"
//!
//! [[responses]]
//! id = "a"
//! operation = "save"
//! steps = [{ outcome = "reject", status = 422, detail = "title required" }]
//! ```

use anyhow::{Context, Result};
use dg_adapters::{ScriptedResourceApi, ScriptedResponse};
use dg_core::{BulkOperation, GuardConfig, ResourceId, TrackedResource};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub guard: GuardConfig,
    /// Route the history starts at
    pub start: String,
    pub focus: Option<ResourceId>,
    pub resources: Vec<TrackedResource>,
    pub responses: Vec<ScenarioResponse>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            guard: GuardConfig::default(),
            start: "/".to_string(),
            focus: None,
            resources: Vec::new(),
            responses: Vec::new(),
        }
    }
}

/// Scripted answers for one resource
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioResponse {
    pub id: ResourceId,
    /// Only for this operation; both when absent
    pub operation: Option<BulkOperation>,
    pub steps: Vec<ScriptedResponse>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Remote API answering as scripted
    pub fn api(&self) -> ScriptedResourceApi {
        let api = ScriptedResourceApi::new();
        for response in &self.responses {
            for step in &response.steps {
                match response.operation {
                    Some(operation) => api.script_for(operation, response.id.clone(), step.clone()),
                    None => api.script(response.id.clone(), step.clone()),
                };
            }
        }
        api
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
