// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use sluice_core::{Event, PhaseCheck, RunState};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One progress line per reducer event
pub fn event_line(event: &Event) -> String {
    match event {
        Event::RunStarted { run_id, dry_run } => {
            let suffix = if *dry_run { " (dry run)" } else { "" };
            format!("run {run_id} started{suffix}")
        }
        Event::PhaseStarted { phase } => format!("[{phase}] started"),
        Event::CheckRecorded { phase, check } => format!("[{phase}]   {}", check_line(check)),
        Event::PhasePassed { phase } => format!("[{phase}] passed"),
        Event::PhaseFailed {
            phase,
            error: Some(error),
        } => format!("[{phase}] failed: {error}"),
        Event::PhaseFailed { phase, error: None } => format!("[{phase}] failed"),
        Event::RunCompleted => "run completed".to_string(),
        Event::RunAborted {
            reason: Some(reason),
        } => format!("run aborted: {reason}"),
        Event::RunAborted { reason: None } => "run aborted".to_string(),
        Event::RunReset => "run reset".to_string(),
    }
}

fn check_line(check: &PhaseCheck) -> String {
    let mark = if check.passed { "PASS" } else { "FAIL" };
    match &check.detail {
        Some(detail) => format!("{mark} {}: {detail}", check.name),
        None => format!("{mark} {}", check.name),
    }
}

/// Final per-phase table with failing checks spelled out
pub fn summary(state: &RunState) -> String {
    let mut out = String::new();
    let run_id = state
        .run_id
        .as_ref()
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let _ = writeln!(out, "Run {}: {}", run_id, state.status.name());

    for result in &state.phases {
        let passed = result.checks.iter().filter(|c| c.passed).count();
        if result.checks.is_empty() {
            let _ = writeln!(
                out,
                "  {:<10} {}",
                result.phase.name(),
                result.status.name()
            );
        } else {
            let _ = writeln!(
                out,
                "  {:<10} {:<8} {}/{} checks",
                result.phase.name(),
                result.status.name(),
                passed,
                result.checks.len()
            );
        }
        for check in result.failed_checks() {
            let _ = writeln!(out, "      {}", check_line(check));
        }
    }
    out
}

/// Print the final state in the requested format
pub fn print_state(state: &RunState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", summary(state)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state)?),
    }
    Ok(())
}
