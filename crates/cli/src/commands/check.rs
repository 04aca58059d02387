// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dg check <scenario>` - Report drafts and whether leaving is guarded

use crate::output::{self, OutputFormat};
use crate::scenario::Scenario;
use anyhow::Result;
use clap::Args;
use dg_core::{draft_resources, ResourceId};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CheckOutcome {
    tracked: usize,
    drafts: Vec<ResourceId>,
    guarded: bool,
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "tracked: {}", self.tracked)?;
        let ids: Vec<&str> = self.drafts.iter().map(|id| id.as_str()).collect();
        if ids.is_empty() {
            writeln!(f, "drafts: 0")?;
        } else {
            writeln!(f, "drafts: {} ({})", ids.len(), ids.join(", "))?;
        }
        writeln!(f, "guarding: {}", if self.guarded { "on" } else { "off" })
    }
}

pub fn check(args: CheckArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let drafts: Vec<ResourceId> = draft_resources(&scenario.resources)
        .into_iter()
        .map(|r| r.id.clone())
        .collect();

    let outcome = CheckOutcome {
        tracked: scenario.resources.len(),
        guarded: !drafts.is_empty(),
        drafts,
    };
    output::print(&outcome, args.format);
    Ok(())
}
