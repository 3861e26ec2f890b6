// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing support for state machine actions

use crate::pipeline::Action;

/// Trait for values that should be traced
///
/// Provides consistent naming and structured fields for logging.
pub trait Traced {
    /// Name for log spans (e.g., "phase_started", "abort")
    fn name(&self) -> &'static str;

    /// Key-value pairs for structured logging
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl Traced for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Start { .. } => "start",
            Action::PhaseStarted { .. } => "phase_started",
            Action::CheckRecorded { .. } => "check_recorded",
            Action::PhasePassed { .. } => "phase_passed",
            Action::PhaseFailed { .. } => "phase_failed",
            Action::Complete => "complete",
            Action::Abort { .. } => "abort",
            Action::Reset => "reset",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Action::Start { run_id, config } => vec![
                ("run_id", run_id.to_string()),
                ("keywords", config.keywords.len().to_string()),
                ("sites", config.sites.len().to_string()),
                ("dry_run", config.dry_run.to_string()),
            ],
            Action::PhaseStarted { phase } | Action::PhasePassed { phase } => {
                vec![("phase", phase.to_string())]
            }
            Action::CheckRecorded { phase, check } => vec![
                ("phase", phase.to_string()),
                ("check", check.name.clone()),
                ("passed", check.passed.to_string()),
            ],
            Action::PhaseFailed { phase, error } => {
                let mut fields = vec![("phase", phase.to_string())];
                if let Some(error) = error {
                    fields.push(("error", error.clone()));
                }
                fields
            }
            Action::Abort { reason: Some(reason) } => vec![("reason", reason.clone())],
            Action::Complete | Action::Abort { reason: None } | Action::Reset => vec![],
        }
    }
}
