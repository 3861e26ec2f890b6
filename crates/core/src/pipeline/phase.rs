// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline phases and the checks recorded inside them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed stages of a pipeline run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePhase {
    Preflight,
    Probe,
    Pilot,
    Batch,
    Verify,
}

impl PipelinePhase {
    /// Every phase, in the order the engine runs them
    pub const ALL: [PipelinePhase; 5] = [
        PipelinePhase::Preflight,
        PipelinePhase::Probe,
        PipelinePhase::Pilot,
        PipelinePhase::Batch,
        PipelinePhase::Verify,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PipelinePhase::Preflight => "preflight",
            PipelinePhase::Probe => "probe",
            PipelinePhase::Pilot => "pilot",
            PipelinePhase::Batch => "batch",
            PipelinePhase::Verify => "verify",
        }
    }

    /// Position of this phase in [`PipelinePhase::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether a failure of this phase aborts the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelinePhase::Preflight | PipelinePhase::Probe | PipelinePhase::Pilot
        )
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status of a single phase within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    /// Not reached yet
    Pending,
    /// Currently executing
    Running,
    Passed,
    Failed,
    /// Never ran because the run stopped earlier
    Skipped,
}

impl PhaseStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::Running => "running",
            PhaseStatus::Passed => "passed",
            PhaseStatus::Failed => "failed",
            PhaseStatus::Skipped => "skipped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PhaseStatus::Passed | PhaseStatus::Failed | PhaseStatus::Skipped
        )
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the synthetic check appended when a phase fails with an error
pub const ERROR_CHECK: &str = "Error";

/// One verification performed inside a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCheck {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PhaseCheck {
    pub fn pass(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: Some(detail.into()),
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }

    /// Check carrying the description of an error that failed the phase
    pub fn error(message: impl Into<String>) -> Self {
        Self::fail(ERROR_CHECK, message)
    }

    /// Build a check from a condition, using the same detail either way
    pub fn expect(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: Some(detail.into()),
        }
    }
}

/// Per-run record of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: PipelinePhase,
    pub status: PhaseStatus,
    pub checks: Vec<PhaseCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PhaseResult {
    pub fn pending(phase: PipelinePhase) -> Self {
        Self {
            phase,
            status: PhaseStatus::Pending,
            checks: Vec::new(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Checks that did not pass
    pub fn failed_checks(&self) -> impl Iterator<Item = &PhaseCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}
