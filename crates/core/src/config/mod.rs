// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guard configuration
//!
//! Per-operation timeouts, cleanup retry policy and the fallback route.
//! Every field has a default, so an empty TOML document is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::bulk::BulkOperation;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid guard config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Budgets for the user-initiated save-all / discard-all path
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    #[serde(with = "humantime_serde")]
    pub save_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub delete_timeout: Duration,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            save_timeout: Duration::from_secs(15),
            delete_timeout: Duration::from_secs(10),
        }
    }
}

impl BulkConfig {
    pub fn timeout_for(&self, operation: BulkOperation) -> Duration {
        match operation {
            BulkOperation::Save => self.save_timeout,
            BulkOperation::Delete => self.delete_timeout,
        }
    }
}

/// Retry policy for best-effort cleanup on unmount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Retry rounds after the first attempt
    pub max_retries: u32,
    /// Wait between rounds
    #[serde(with = "humantime_serde")]
    pub backoff: Duration,
    /// Per-call budget for each cleanup delete
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for a guarded session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where focus goes when the last resource is removed
    pub fallback_route: String,
    pub bulk: BulkConfig,
    pub cleanup: CleanupConfig,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            fallback_route: "/resources".to_string(),
            bulk: BulkConfig::default(),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl GuardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_fallback_route(mut self, route: impl Into<String>) -> Self {
        self.fallback_route = route.into();
        self
    }

    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.bulk.save_timeout = timeout;
        self
    }

    pub fn with_delete_timeout(mut self, timeout: Duration) -> Self {
        self.bulk.delete_timeout = timeout;
        self
    }

    pub fn with_cleanup(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.cleanup.max_retries = max_retries;
        self.cleanup.backoff = backoff;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
