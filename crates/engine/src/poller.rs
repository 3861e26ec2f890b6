// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-interval polling of remote task status

use crate::cancel::guarded;
use crate::EngineError;
use sluice_adapters::{CrawlerGateway, TaskStatus};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Polls a task until it reaches a terminal state
#[derive(Clone)]
pub struct TaskPoller<G> {
    gateway: G,
    interval: Duration,
}

impl<G: CrawlerGateway> TaskPoller<G> {
    pub fn new(gateway: G, interval: Duration) -> Self {
        Self { gateway, interval }
    }

    /// Query `task_id` every `interval` until it is `done` or `failed`.
    ///
    /// Fails with [`EngineError::Timeout`] once `max_wait` has elapsed, and
    /// with [`EngineError::Cancelled`] as soon as `token` fires, including
    /// mid-query and mid-sleep.
    pub async fn poll(
        &self,
        task_id: &str,
        token: &CancellationToken,
        max_wait: Duration,
    ) -> Result<TaskStatus, EngineError> {
        let start = Instant::now();
        let mut polls = 0u32;

        while start.elapsed() < max_wait {
            let status = guarded(token, self.gateway.task_status(task_id)).await??;
            polls += 1;
            if status.status.is_terminal() {
                tracing::debug!(task_id, polls, status = %status.status, "task finished");
                return Ok(status);
            }
            tracing::trace!(task_id, polls, status = %status.status, "task not finished");
            guarded(token, tokio::time::sleep(self.interval)).await?;
        }

        tracing::warn!(task_id, polls, waited_s = max_wait.as_secs(), "task poll timed out");
        Err(EngineError::Timeout {
            task_id: task_id.to_string(),
            waited: max_wait,
        })
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
