// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser "confirm before closing" prompt, registered only while drafts exist

use dg_adapters::ViewAdapter;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct UnloadGuard<V> {
    view: V,
    registered: AtomicBool,
}

impl<V: ViewAdapter> UnloadGuard<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            registered: AtomicBool::new(false),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// Register or unregister the prompt; only acts when the state flips
    pub fn sync(&self, has_unsaved: bool) {
        if self.registered.swap(has_unsaved, Ordering::SeqCst) == has_unsaved {
            return;
        }
        if has_unsaved {
            tracing::debug!("unload prompt registered");
            self.view.register_unload_prompt();
        } else {
            tracing::debug!("unload prompt unregistered");
            self.view.unregister_unload_prompt();
        }
    }

    /// Unregister unconditionally
    pub fn teardown(&self) {
        self.registered.store(false, Ordering::SeqCst);
        self.view.unregister_unload_prompt();
    }
}

#[cfg(test)]
#[path = "unload_tests.rs"]
mod tests;
