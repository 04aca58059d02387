// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dg simulate <scenario>` - Attempt to leave a guarded workflow

use crate::adapters::{ConsoleNotifier, ConsoleView, Transcript, ViewEvent};
use crate::output::{self, OutputFormat};
use crate::scenario::Scenario;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use dg_adapters::{
    HistoryNavigator, Navigator, SharedResourceList, TracedNavigator, TracedResourceApi,
};
use dg_core::{BulkReport, ExitPhase, ResourceId};
use dg_engine::{GuardSession, SessionDeps};
use serde::Serialize;
use std::path::PathBuf;

/// What the simulated user answers when asked to confirm leaving
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// Save all drafts, then leave
    Save,
    /// Discard all drafts, then leave
    Discard,
    /// Cancel and stay
    Stay,
    /// Close the workflow without answering
    Unmount,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    #[arg(long, value_enum, default_value_t = Choice::Save)]
    pub choice: Choice,

    /// Route to attempt navigating to
    #[arg(long, default_value = "/elsewhere")]
    pub to: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CleanupOutcome {
    deleted: Vec<ResourceId>,
    abandoned: Vec<ResourceId>,
    rounds: u32,
}

#[derive(Serialize)]
struct SimulationOutcome {
    choice: Choice,
    guarded: bool,
    report: Option<BulkReport>,
    cleanup: Option<CleanupOutcome>,
    location: String,
    remaining: Vec<ResourceId>,
    events: Vec<ViewEvent>,
}

impl std::fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.guarded {
            writeln!(f, "not guarded: no unsaved drafts")?;
        }
        if let Some(report) = &self.report {
            writeln!(f, "{}", report)?;
            for failure in &report.failures {
                writeln!(f, "  {}: {}", failure.id, failure.reason)?;
            }
        }
        if let Some(cleanup) = &self.cleanup {
            writeln!(
                f,
                "cleanup: {} deleted, {} abandoned, {} rounds",
                cleanup.deleted.len(),
                cleanup.abandoned.len(),
                cleanup.rounds
            )?;
        }
        writeln!(f, "location: {}", self.location)?;
        let ids: Vec<&str> = self.remaining.iter().map(|id| id.as_str()).collect();
        if ids.is_empty() {
            writeln!(f, "remaining: none")
        } else {
            writeln!(f, "remaining: {}", ids.join(", "))
        }
    }
}

pub async fn simulate(args: SimulateArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let transcript = Transcript::new(args.format == OutputFormat::Text);
    let source = SharedResourceList::new(scenario.resources.clone());
    let history = HistoryNavigator::new(scenario.start.clone());

    let session = GuardSession::new(
        SessionDeps {
            api: TracedResourceApi::new(scenario.api()),
            source: source.clone(),
            notify: ConsoleNotifier::new(transcript.clone()),
            view: ConsoleView::new(transcript.clone()),
            navigator: TracedNavigator::new(history.clone()),
        },
        scenario.guard.clone(),
    );
    session.mount();
    session.set_focus(scenario.focus.clone());

    session.navigator().push(&args.to);
    let guarded = session.phase() == ExitPhase::Confirming;

    let mut report = None;
    let mut cleanup = None;
    match args.choice {
        Choice::Save if guarded => report = Some(session.save_and_exit().await?),
        Choice::Discard if guarded => report = Some(session.exit_without_saving().await?),
        Choice::Stay if guarded => session.stay()?,
        Choice::Unmount => {
            if let Some(handle) = session.unmount() {
                let done = handle.await.context("cleanup task failed")?;
                cleanup = Some(CleanupOutcome {
                    deleted: done.deleted,
                    abandoned: done.abandoned,
                    rounds: done.rounds,
                });
            }
        }
        // Nothing was captured, so there is nothing to answer
        Choice::Save | Choice::Discard | Choice::Stay => {}
    }

    session.flush_notices().await;
    drop(session);

    let outcome = SimulationOutcome {
        choice: args.choice,
        guarded,
        report,
        cleanup,
        location: history.current(),
        remaining: source.ids(),
        events: transcript.events(),
    };
    output::print(&outcome, args.format);
    Ok(())
}
