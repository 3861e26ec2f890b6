// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline phases and the run state machine

mod phase;
mod state;

pub use phase::{PhaseCheck, PhaseResult, PhaseStatus, PipelinePhase, ERROR_CHECK};
pub use state::{Action, RunState, RunStatus};
