// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Draft guard engine
//!
//! Async orchestration around the pure lifecycle state machine: navigation
//! interception, the settle-all bulk fan-out, the exit flow, and teardown.

mod bulk;
mod cleanup;
mod error;
mod exit_flow;
mod interceptor;
mod session;
mod tracking;
mod unload;

pub use bulk::BulkCoordinator;
pub use cleanup::{cleanup_all, spawn_cleanup, CleanupReport};
pub use error::{OperationError, SessionError};
pub use exit_flow::ExitFlow;
pub use interceptor::{Interceptor, Proceed};
pub use session::{GuardSession, SessionDeps};
pub use unload::UnloadGuard;
