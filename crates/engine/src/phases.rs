// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The five pipeline phases, run in order against the remote services

use crate::cancel::guarded;
use crate::handle::RunHandle;
use crate::poller::TaskPoller;
use crate::EngineError;
use sluice_adapters::{CrawlerGateway, GatewayError, QualityAdapter, TaskRequest, TaskState};
use sluice_core::{
    Action, Clock, LaunchConfig, PhaseCheck, PilotSettings, PipelinePhase, PollSettings, Settings,
    VerifyThresholds,
};
use std::future::Future;
use std::time::Duration;
use tracing::Instrument;

/// How a run that was not cancelled ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// A fatal phase failed
    Aborted { phase: PipelinePhase },
}

/// Runs the phase sequence for one launch config
pub struct PhaseEngine<G, Q> {
    gateway: G,
    quality: Q,
    poller: TaskPoller<G>,
    polling: PollSettings,
    pilot: PilotSettings,
    verify: VerifyThresholds,
}

impl<G: CrawlerGateway, Q: QualityAdapter> PhaseEngine<G, Q> {
    pub fn new(gateway: G, quality: Q, settings: &Settings) -> Self {
        Self {
            poller: TaskPoller::new(gateway.clone(), settings.polling.interval),
            gateway,
            quality,
            polling: settings.polling.clone(),
            pilot: settings.pilot.clone(),
            verify: settings.verify.clone(),
        }
    }

    /// Drive the phases of an already started run.
    ///
    /// Every phase outcome is written through `run`. The only error that
    /// escapes is [`EngineError::Cancelled`]; whoever cancelled owns the
    /// state transition for it.
    pub async fn run<C: Clock>(
        &self,
        config: &LaunchConfig,
        run: &RunHandle<C>,
    ) -> Result<RunOutcome, EngineError> {
        let step = PhaseStep::begin(run, PipelinePhase::Preflight);
        if !self.preflight(&step).instrument(step.span()).await? {
            return Ok(abort(run, PipelinePhase::Preflight));
        }

        if config.dry_run {
            tracing::info!("dry run, skipping crawl phases");
            run.apply(Action::Complete);
            return Ok(RunOutcome::Completed);
        }

        let (site, keyword) = config.pilot_target(&self.pilot);

        let step = PhaseStep::begin(run, PipelinePhase::Probe);
        let probe = TaskRequest::Probe { site: site.clone() };
        if !self
            .task(&step, "Probe", probe, self.polling.timeout)
            .instrument(step.span())
            .await?
        {
            return Ok(abort(run, PipelinePhase::Probe));
        }

        let step = PhaseStep::begin(run, PipelinePhase::Pilot);
        let pilot = TaskRequest::Search {
            site,
            keyword,
            limit: self.pilot.limit,
        };
        if !self
            .task(&step, "Pilot", pilot, self.polling.timeout)
            .instrument(step.span())
            .await?
        {
            return Ok(abort(run, PipelinePhase::Pilot));
        }

        let step = PhaseStep::begin(run, PipelinePhase::Batch);
        let batch = TaskRequest::Batch {
            keywords: config.keywords.clone(),
            sites: config.sites.clone(),
            limit_per_keyword: config.limit_per_keyword,
        };
        if !self
            .task(&step, "Batch", batch, self.polling.batch_timeout)
            .instrument(step.span())
            .await?
        {
            tracing::info!("batch failed, continuing to verify");
        }

        let step = PhaseStep::begin(run, PipelinePhase::Verify);
        self.verify(&step).instrument(step.span()).await?;

        run.apply(Action::Complete);
        Ok(RunOutcome::Completed)
    }

    async fn preflight<C: Clock>(&self, step: &PhaseStep<'_, C>) -> Result<bool, EngineError> {
        let Some(health) = step.attempt(self.gateway.health()).await? else {
            return Ok(false);
        };
        step.check(PhaseCheck::pass("Health endpoint", health.status));

        let Some(ready) = step.attempt(self.gateway.readiness()).await? else {
            return Ok(false);
        };
        step.check(PhaseCheck::pass("Readiness endpoint", ready.status));

        let Some(list) = step.attempt(self.gateway.list_crawlers()).await? else {
            return Ok(false);
        };
        let registered = PhaseCheck::expect(
            "Crawlers registered",
            list.total > 0,
            format!("{} crawlers", list.total),
        );
        if !step.check(registered) {
            return Ok(step.fail(None));
        }
        Ok(step.pass())
    }

    /// Submit one task and wait for it; shared by probe, pilot and batch
    async fn task<C: Clock>(
        &self,
        step: &PhaseStep<'_, C>,
        label: &str,
        request: TaskRequest,
        max_wait: Duration,
    ) -> Result<bool, EngineError> {
        let Some(handle) = step.attempt(self.gateway.submit(&request)).await? else {
            return Ok(false);
        };
        step.check(PhaseCheck::pass(
            format!("{label} submitted"),
            format!("task {}", handle.task_id),
        ));

        let completed = format!("{label} completed");
        let check = match self
            .poller
            .poll(&handle.task_id, step.run.token(), max_wait)
            .await
        {
            Ok(status) if status.status == TaskState::Done => PhaseCheck::pass(completed, "done"),
            Ok(status) => {
                let detail = status
                    .error
                    .unwrap_or_else(|| format!("task ended {}", status.status));
                PhaseCheck::fail(completed, detail)
            }
            // A poll timeout counts as a failed task
            Err(EngineError::Timeout { waited, .. }) => PhaseCheck::fail(
                completed,
                format!("timed out after {}s", waited.as_secs()),
            ),
            Err(EngineError::Gateway(e)) => return Ok(step.fail(Some(e.to_string()))),
            Err(EngineError::Cancelled) => return Err(EngineError::Cancelled),
        };

        if !step.check(check) {
            return Ok(step.fail(None));
        }
        Ok(step.pass())
    }

    async fn verify<C: Clock>(&self, step: &PhaseStep<'_, C>) -> Result<bool, EngineError> {
        let limits = &self.verify;

        let Some(ingestion) = step.attempt(self.quality.ingestion_summary()).await? else {
            return Ok(false);
        };
        step.check(PhaseCheck::expect(
            "Ingestion pass rate",
            ingestion.pass_rate > limits.min_pass_rate,
            format!(
                "{:.1}% of {} records, needs over {:.1}%",
                ingestion.pass_rate * 100.0,
                ingestion.total_records,
                limits.min_pass_rate * 100.0
            ),
        ));

        let Some(coverage) = step.attempt(self.quality.coverage()).await? else {
            return Ok(false);
        };
        let average = coverage.average();
        step.check(PhaseCheck::expect(
            "Field coverage",
            average > limits.min_coverage,
            format!(
                "{:.1}% mean over {} fields, needs over {:.1}%",
                average * 100.0,
                coverage.fields.len(),
                limits.min_coverage * 100.0
            ),
        ));

        let Some(freshness) = step.attempt(self.quality.freshness()).await? else {
            return Ok(false);
        };
        step.check(PhaseCheck::expect(
            "Data freshness",
            freshness.avg_age_days < limits.max_age_days,
            format!(
                "{:.1} days average, {} stale, limit {:.1}",
                freshness.avg_age_days, freshness.stale_count, limits.max_age_days
            ),
        ));

        // Threshold misses are diagnostics only
        Ok(step.pass())
    }
}

fn abort<C: Clock>(run: &RunHandle<C>, phase: PipelinePhase) -> RunOutcome {
    tracing::warn!(%phase, "fatal phase failed, aborting run");
    run.apply(Action::Abort {
        reason: Some(format!("{phase} failed")),
    });
    RunOutcome::Aborted { phase }
}

/// One phase in progress: records checks and the final status
struct PhaseStep<'a, C> {
    run: &'a RunHandle<C>,
    phase: PipelinePhase,
}

impl<'a, C: Clock> PhaseStep<'a, C> {
    fn begin(run: &'a RunHandle<C>, phase: PipelinePhase) -> Self {
        run.apply(Action::PhaseStarted { phase });
        Self { run, phase }
    }

    fn span(&self) -> tracing::Span {
        tracing::info_span!("phase", phase = self.phase.name())
    }

    /// Await a remote call. A service error fails the phase and yields `None`.
    async fn attempt<T, F>(&self, call: F) -> Result<Option<T>, EngineError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match guarded(self.run.token(), call).await? {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.fail(Some(e.to_string()));
                Ok(None)
            }
        }
    }

    /// Record a check and return whether it passed
    fn check(&self, check: PhaseCheck) -> bool {
        let passed = check.passed;
        self.run.apply(Action::CheckRecorded {
            phase: self.phase,
            check,
        });
        passed
    }

    fn pass(&self) -> bool {
        self.run.apply(Action::PhasePassed { phase: self.phase });
        true
    }

    fn fail(&self, error: Option<String>) -> bool {
        match &error {
            Some(error) => tracing::warn!(error = %error, "phase errored"),
            None => tracing::info!("phase checks failed"),
        }
        self.run.apply(Action::PhaseFailed {
            phase: self.phase,
            error,
        });
        false
    }
}

#[cfg(test)]
#[path = "phases_tests.rs"]
mod tests;
