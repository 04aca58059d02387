// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake navigator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::Navigator;
use std::sync::{Arc, Mutex};

/// Recorded navigation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCall {
    Push(String),
    Replace(String),
    Back,
    Forward,
}

/// Fake navigator that records every call that reaches it
#[derive(Clone, Default)]
pub struct FakeNavigator {
    calls: Arc<Mutex<Vec<NavCall>>>,
}

impl FakeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<NavCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: NavCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl Navigator for FakeNavigator {
    fn push(&self, to: &str) {
        self.record(NavCall::Push(to.to_string()));
    }

    fn replace(&self, to: &str) {
        self.record(NavCall::Replace(to.to_string()));
    }

    fn back(&self) {
        self.record(NavCall::Back);
    }

    fn forward(&self) {
        self.record(NavCall::Forward);
    }
}
