// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state machine
//!
//! [`RunState::transition`] is the only way a run changes. It is a total
//! function of the previous state and an [`Action`]: actions that make no
//! sense in the current state return the state unchanged with no events.

use super::phase::{PhaseCheck, PhaseResult, PhaseStatus, PipelinePhase};
use crate::clock::Clock;
use crate::event::Event;
use crate::id::RunId;
use crate::launch::LaunchConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Aborted,
}

impl RunStatus {
    pub fn name(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Aborted => "aborted",
        }
    }

    /// Terminal runs only change again through a reset or a new start
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Aborted)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs to the run state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Begin a fresh run, discarding whatever came before
    Start { run_id: RunId, config: LaunchConfig },
    PhaseStarted { phase: PipelinePhase },
    CheckRecorded { phase: PipelinePhase, check: PhaseCheck },
    PhasePassed { phase: PipelinePhase },
    /// Phase failed; an error description becomes a synthetic "Error" check
    PhaseFailed {
        phase: PipelinePhase,
        error: Option<String>,
    },
    /// Phase sequence finished
    Complete,
    /// Stop the run: running phase fails, pending phases are skipped
    Abort { reason: Option<String> },
    /// Back to the idle snapshot
    Reset,
}

/// Single source of truth for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
    pub config: Option<LaunchConfig>,
    pub current_phase: Option<PipelinePhase>,
    /// One entry per [`PipelinePhase`], in [`PipelinePhase::ALL`] order
    pub phases: Vec<PhaseResult>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle()
    }
}

impl RunState {
    /// The initial snapshot: idle, every phase pending, nothing configured
    pub fn idle() -> Self {
        Self {
            run_id: None,
            config: None,
            current_phase: None,
            phases: PipelinePhase::ALL
                .into_iter()
                .map(PhaseResult::pending)
                .collect(),
            status: RunStatus::Idle,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn phase(&self, phase: PipelinePhase) -> &PhaseResult {
        &self.phases[phase.index()]
    }

    fn phase_mut(&mut self, phase: PipelinePhase) -> &mut PhaseResult {
        &mut self.phases[phase.index()]
    }

    /// Status of every phase, in order
    pub fn statuses(&self) -> Vec<(PipelinePhase, PhaseStatus)> {
        self.phases.iter().map(|p| (p.phase, p.status)).collect()
    }

    fn phase_is(&self, phase: PipelinePhase, status: PhaseStatus) -> bool {
        self.status == RunStatus::Running && self.phase(phase).status == status
    }

    /// A phase may start only once every earlier phase has finished
    fn can_start(&self, phase: PipelinePhase) -> bool {
        self.phase_is(phase, PhaseStatus::Pending)
            && self.phases[..phase.index()]
                .iter()
                .all(|p| p.status.is_terminal())
    }

    /// Pure transition function - returns new state and emitted events
    pub fn transition(&self, action: Action, clock: &impl Clock) -> (RunState, Vec<Event>) {
        let now = clock.now();

        match action {
            Action::Start { run_id, config } => {
                let dry_run = config.dry_run;
                let state = RunState {
                    run_id: Some(run_id.clone()),
                    config: Some(config),
                    status: RunStatus::Running,
                    started_at: Some(now),
                    ..RunState::idle()
                };
                (state, vec![Event::RunStarted { run_id, dry_run }])
            }

            Action::Reset => {
                if *self == RunState::idle() {
                    return (self.clone(), vec![]);
                }
                (RunState::idle(), vec![Event::RunReset])
            }

            // Pending → Running
            Action::PhaseStarted { phase } if self.can_start(phase) => {
                let mut state = self.clone();
                state.current_phase = Some(phase);
                let result = state.phase_mut(phase);
                result.status = PhaseStatus::Running;
                result.started_at = Some(now);
                (state, vec![Event::PhaseStarted { phase }])
            }

            // Checks only land on the running phase
            Action::CheckRecorded { phase, check } if self.phase_is(phase, PhaseStatus::Running) => {
                let mut state = self.clone();
                state.phase_mut(phase).checks.push(check.clone());
                (state, vec![Event::CheckRecorded { phase, check }])
            }

            // Running → Passed
            Action::PhasePassed { phase } if self.phase_is(phase, PhaseStatus::Running) => {
                let mut state = self.clone();
                let result = state.phase_mut(phase);
                result.status = PhaseStatus::Passed;
                result.completed_at = Some(now);
                (state, vec![Event::PhasePassed { phase }])
            }

            // Running → Failed
            Action::PhaseFailed { phase, error } if self.phase_is(phase, PhaseStatus::Running) => {
                let mut state = self.clone();
                let result = state.phase_mut(phase);
                if let Some(message) = &error {
                    result.checks.push(PhaseCheck::error(message.clone()));
                }
                result.status = PhaseStatus::Failed;
                result.completed_at = Some(now);
                (state, vec![Event::PhaseFailed { phase, error }])
            }

            Action::Complete if self.status == RunStatus::Running => {
                let state = RunState {
                    status: RunStatus::Completed,
                    completed_at: Some(now),
                    ..self.clone()
                };
                (state, vec![Event::RunCompleted])
            }

            Action::Abort { reason } if self.status == RunStatus::Running => {
                let mut state = self.clone();
                for result in &mut state.phases {
                    match result.status {
                        PhaseStatus::Running => {
                            result.status = PhaseStatus::Failed;
                            result.completed_at = Some(now);
                        }
                        PhaseStatus::Pending => result.status = PhaseStatus::Skipped,
                        _ => {}
                    }
                }
                state.status = RunStatus::Aborted;
                state.completed_at = Some(now);
                (state, vec![Event::RunAborted { reason }])
            }

            // Everything else is stale or out of order
            _ => (self.clone(), vec![]),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
