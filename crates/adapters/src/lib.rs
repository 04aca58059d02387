// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the collaborators around a guarded session

pub mod navigator;
pub mod notify;
pub mod remote;
pub mod source;
pub mod traced;
pub mod view;

pub use navigator::{HistoryNavigator, Navigator};
pub use notify::{NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use remote::{
    NoOpResourceApi, RemoteCall, RemoteError, ResourceApi, ScriptedOutcome, ScriptedResourceApi,
    ScriptedResponse,
};
pub use source::{ResourceSource, SharedResourceList};
pub use traced::{TracedNavigator, TracedResourceApi};
pub use view::{NoOpViewAdapter, SelectionChange, ViewAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use navigator::{FakeNavigator, NavCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use view::{FakeViewAdapter, ViewCall};
