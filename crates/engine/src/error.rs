// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the pipeline engine

use sluice_adapters::GatewayError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a run
#[derive(Debug, Error)]
pub enum EngineError {
    /// The run's cancellation token fired
    #[error("run cancelled")]
    Cancelled,
    #[error("task {task_id} not finished after {}s", waited.as_secs())]
    Timeout { task_id: String, waited: Duration },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
