// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console adapters for the simulator
//!
//! Every notice and view request becomes a [`ViewEvent`] in a shared
//! transcript. In text mode events are also printed as they happen.

use async_trait::async_trait;
use dg_adapters::{NotifyAdapter, NotifyError, SelectionChange, ViewAdapter};
use dg_core::{Notice, ResourceId, TrackedResource};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Something the simulated user would have seen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    Notice(Notice),
    ConfirmOpened { drafts: Vec<ResourceId> },
    ConfirmClosed,
    UnloadPrompt { registered: bool },
    Selected { change: SelectionChange },
}

impl std::fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewEvent::Notice(notice) => write!(f, "notice: {}", notice),
            ViewEvent::ConfirmOpened { drafts } => {
                let ids: Vec<&str> = drafts.iter().map(|id| id.as_str()).collect();
                write!(
                    f,
                    "confirm: leave with {} unsaved ({})?",
                    drafts.len(),
                    ids.join(", ")
                )
            }
            ViewEvent::ConfirmClosed => write!(f, "confirm: closed"),
            ViewEvent::UnloadPrompt { registered: true } => write!(f, "unload prompt: on"),
            ViewEvent::UnloadPrompt { registered: false } => write!(f, "unload prompt: off"),
            ViewEvent::Selected {
                change: SelectionChange::Focus(id),
            } => write!(f, "focus: {}", id),
            ViewEvent::Selected {
                change: SelectionChange::Navigate(route),
            } => write!(f, "focus: none, go to {}", route),
        }
    }
}

/// Shared, append-only event log
#[derive(Clone, Default)]
pub struct Transcript {
    events: Arc<Mutex<Vec<ViewEvent>>>,
    echo: bool,
}

impl Transcript {
    /// `echo` prints each event to stdout as it is recorded
    pub fn new(echo: bool) -> Self {
        Self {
            events: Arc::default(),
            echo,
        }
    }

    pub fn record(&self, event: ViewEvent) {
        if self.echo {
            println!("{}", event);
        }
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[derive(Clone)]
pub struct ConsoleNotifier {
    transcript: Transcript,
}

impl ConsoleNotifier {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

#[async_trait]
impl NotifyAdapter for ConsoleNotifier {
    async fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        self.transcript.record(ViewEvent::Notice(notice));
        Ok(())
    }
}

/// Console view; the unload prompt is only reported when it changes
#[derive(Clone)]
pub struct ConsoleView {
    transcript: Transcript,
    unload: Arc<AtomicBool>,
}

impl ConsoleView {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            unload: Arc::default(),
        }
    }

    fn set_unload(&self, registered: bool) {
        if self.unload.swap(registered, Ordering::SeqCst) != registered {
            self.transcript.record(ViewEvent::UnloadPrompt { registered });
        }
    }
}

impl ViewAdapter for ConsoleView {
    fn open_confirm(&self, drafts: &[TrackedResource]) {
        self.transcript.record(ViewEvent::ConfirmOpened {
            drafts: drafts.iter().map(|r| r.id.clone()).collect(),
        });
    }

    fn close_confirm(&self) {
        self.transcript.record(ViewEvent::ConfirmClosed);
    }

    fn register_unload_prompt(&self) {
        self.set_unload(true);
    }

    fn unregister_unload_prompt(&self) {
        self.set_unload(false);
    }

    fn select(&self, change: SelectionChange) {
        self.transcript.record(ViewEvent::Selected { change });
    }
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
