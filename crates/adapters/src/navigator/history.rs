// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory history stack

use super::Navigator;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

/// Browser-style history: push truncates forward entries, back/forward
/// move within the stack and stop at either end
#[derive(Clone, Debug)]
pub struct HistoryNavigator {
    history: Arc<Mutex<History>>,
}

impl HistoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Arc::new(Mutex::new(History {
                entries: vec![initial.into()],
                index: 0,
            })),
        }
    }

    /// Current location
    pub fn current(&self) -> String {
        let history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history
            .entries
            .get(history.index)
            .cloned()
            .unwrap_or_default()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .clone()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, to: &str) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        let keep = history.index + 1;
        history.entries.truncate(keep);
        history.entries.push(to.to_string());
        history.index = keep;
    }

    fn replace(&self, to: &str) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        let index = history.index;
        if let Some(entry) = history.entries.get_mut(index) {
            *entry = to.to_string();
        }
    }

    fn back(&self) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.index = history.index.saturating_sub(1);
    }

    fn forward(&self) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        if history.index + 1 < history.entries.len() {
            history.index += 1;
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
