// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sluice-core: data model for the crawl pipeline orchestrator
//!
//! This crate provides:
//! - The fixed phase sequence and per-phase check records
//! - The pure run state machine (`RunState::transition`)
//! - Launch configuration and orchestrator settings
//! - Clock and id abstractions for deterministic tests

pub mod clock;
pub mod event;
pub mod id;
pub mod launch;
pub mod pipeline;
pub mod settings;
pub mod traced;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::Event;
pub use id::{IdGen, RunId, SequentialIdGen, UuidIdGen};
pub use launch::LaunchConfig;
pub use pipeline::{
    Action, PhaseCheck, PhaseResult, PhaseStatus, PipelinePhase, RunState, RunStatus, ERROR_CHECK,
};
pub use settings::{
    PilotSettings, PollSettings, ServiceSettings, Settings, SettingsError, VerifyThresholds,
};
pub use traced::Traced;
