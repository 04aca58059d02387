// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation primitives
//!
//! The interceptor wraps exactly these four calls. Link clicks are routed
//! through the interceptor separately and proceed as a `push`.

mod history;

pub use history::HistoryNavigator;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNavigator, NavCall};

use dg_core::Destination;

/// Router / browser navigation primitives
pub trait Navigator: Send + Sync + 'static {
    fn push(&self, to: &str);

    fn replace(&self, to: &str);

    fn back(&self);

    fn forward(&self);

    /// Perform a captured destination
    fn navigate(&self, destination: &Destination) {
        match destination {
            Destination::Push(to) | Destination::Link(to) => self.push(to),
            Destination::Replace(to) => self.replace(to),
            Destination::Back => self.back(),
            Destination::Forward => self.forward(),
        }
    }
}
