// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Sluice run engine: phase sequencing, task polling and run control

mod cancel;
mod controller;
mod error;
mod handle;
mod phases;
mod poller;

pub use cancel::guarded;
pub use controller::RunController;
pub use error::EngineError;
pub use handle::RunHandle;
pub use phases::{PhaseEngine, RunOutcome};
pub use poller::TaskPoller;
