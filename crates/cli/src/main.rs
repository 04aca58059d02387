// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dg - draft guard scenario simulator

mod adapters;
mod commands;
mod output;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, simulate};

#[derive(Parser)]
#[command(
    name = "dg",
    version,
    about = "dg simulates guarded workflows - navigation guarding and draft cleanup"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a session over a scenario, attempt to leave, and apply a choice
    Simulate(simulate::SimulateArgs),
    /// Report the drafts in a scenario and whether leaving would be guarded
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Commands::Simulate(args) => simulate::simulate(args).await,
        Commands::Check(args) => check::check(args),
    }
}

// Logs go to stderr so stdout stays parseable
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("DG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
