// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sluice run` - Drive one pipeline run against the live services

use crate::output::{self, OutputFormat};
use crate::source::SettingsSource;
use anyhow::Result;
use clap::Args;
use sluice_adapters::{HttpGateway, HttpQualityAdapter, TracedGateway, TracedQualityAdapter};
use sluice_core::{Event, LaunchConfig, RunStatus, SystemClock, UuidIdGen};
use sluice_engine::RunController;
use std::process::ExitCode;
use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Args)]
pub struct RunArgs {
    /// Keyword to crawl (repeatable)
    #[arg(short, long = "keyword", value_name = "K", required = true)]
    pub keywords: Vec<String>,

    /// Site to crawl (repeatable; default is every registered site)
    #[arg(short, long = "site", value_name = "S")]
    pub sites: Vec<String>,

    /// Items per keyword in the batch crawl
    #[arg(short, long, default_value = "10")]
    pub limit: u32,

    /// Stop after the preflight checks
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub source: SettingsSource,

    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

pub async fn handle(args: RunArgs) -> Result<ExitCode> {
    let settings = args.source.load()?;
    let timeout = settings.service.request_timeout;
    let gateway = TracedGateway::new(HttpGateway::new(&settings.service.base_url, timeout)?);
    let quality =
        TracedQualityAdapter::new(HttpQualityAdapter::new(settings.service.quality_base(), timeout)?);

    let controller = RunController::new(gateway, quality, &settings, SystemClock, UuidIdGen);
    let printer = tokio::spawn(print_events(controller.events(), args.output));

    let config = LaunchConfig {
        keywords: args.keywords,
        sites: args.sites,
        limit_per_keyword: args.limit,
        dry_run: args.dry_run,
    };
    controller.start(config);

    {
        let finished = controller.join();
        tokio::pin!(finished);
        tokio::select! {
            _ = &mut finished => {}
            Ok(()) = tokio::signal::ctrl_c() => {
                eprintln!("\nAborting run...");
                controller.abort();
                finished.await;
            }
        }
    }

    let state = controller.state();
    // Closes the event channel so the printer drains and exits
    drop(controller);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "event printer failed");
    }

    output::print_state(&state, args.output)?;
    Ok(match state.status {
        RunStatus::Completed => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    })
}

async fn print_events(mut events: broadcast::Receiver<Event>, format: OutputFormat) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let OutputFormat::Text = format {
                    println!("{}", output::event_line(&event));
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event output fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
