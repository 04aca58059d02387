// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use dg_core::{Notice, NoticeLevel};
use std::sync::{Arc, Mutex};

/// Fake notification adapter for testing
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    notices: Arc<Mutex<Vec<Notice>>>,
    fail: Arc<Mutex<bool>>,
    hang: Arc<Mutex<bool>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded notices
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recorded notices at one level
    pub fn at_level(&self, level: NoticeLevel) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .collect()
    }

    /// Make every delivery fail (after recording it)
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Make every delivery never complete (after recording it)
    pub fn set_hanging(&self, hang: bool) {
        *self.hang.lock().unwrap_or_else(|e| e.into_inner()) = hang;
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
        let hang = *self.hang.lock().unwrap_or_else(|e| e.into_inner());
        if hang {
            std::future::pending::<()>().await;
        }
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(NotifyError::Failed("toast surface unavailable".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
