// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sluice - crawl pipeline orchestrator CLI

mod commands;
mod completions;
mod output;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{run, settings};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sluice",
    version,
    about = "Sluice - staged crawl pipeline runner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the crawl pipeline once
    Run(run::RunArgs),
    /// Print the effective settings as TOML
    Settings(settings::SettingsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Run(args) => run::handle(args).await,
        Commands::Settings(args) => {
            settings::handle(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            args.write::<Cli>(&mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
