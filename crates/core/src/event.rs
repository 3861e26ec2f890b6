// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by the run state machine

use crate::id::RunId;
use crate::pipeline::{PhaseCheck, PipelinePhase};
use serde::{Deserialize, Serialize};

/// Observable outcome of one applied state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RunStarted {
        run_id: RunId,
        dry_run: bool,
    },
    PhaseStarted {
        phase: PipelinePhase,
    },
    CheckRecorded {
        phase: PipelinePhase,
        check: PhaseCheck,
    },
    PhasePassed {
        phase: PipelinePhase,
    },
    PhaseFailed {
        phase: PipelinePhase,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    RunCompleted,
    RunAborted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    RunReset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run:started",
            Event::PhaseStarted { .. } => "phase:started",
            Event::CheckRecorded { .. } => "phase:check",
            Event::PhasePassed { .. } => "phase:passed",
            Event::PhaseFailed { .. } => "phase:failed",
            Event::RunCompleted => "run:completed",
            Event::RunAborted { .. } => "run:aborted",
            Event::RunReset => "run:reset",
        }
    }

    /// Phase this event concerns, if any
    pub fn phase(&self) -> Option<PipelinePhase> {
        match self {
            Event::PhaseStarted { phase }
            | Event::CheckRecorded { phase, .. }
            | Event::PhasePassed { phase }
            | Event::PhaseFailed { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
