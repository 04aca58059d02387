// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dg-core: pure data and state machines for draftguard
//!
//! This crate provides:
//! - Tracked resources and draft classification
//! - The selection successor policy
//! - The lifecycle (exit flow) state machine
//! - Bulk operation reports and user-facing notices
//! - Guard configuration

pub mod config;
pub mod resource;

// Order matters for dependencies
pub mod bulk;
pub mod classifier;
pub mod lifecycle;
pub mod navigation;
pub mod notice;
pub mod selection;

pub use bulk::{BulkFailure, BulkOperation, BulkReport, BulkSummary, OperationOutcome};
pub use classifier::{draft_count, draft_resources, is_draft, DraftClassifier, DraftSet};
pub use config::{BulkConfig, CleanupConfig, ConfigError, GuardConfig};
pub use lifecycle::{Effect, ExitPhase, LifecycleEvent, LifecycleState, PendingNavigation};
pub use navigation::{Destination, LinkDisposition, LinkTarget};
pub use notice::{notices_for, Notice, NoticeLevel};
pub use resource::{ResourceId, ResourceStatus, TrackedResource};
pub use selection::{pick_next, Successor};
