// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle: start, abort, reset and observation

use crate::handle::{dispatch, RunHandle};
use crate::phases::PhaseEngine;
use crate::EngineError;
use sluice_adapters::{CrawlerGateway, QualityAdapter};
use sluice_core::{
    Action, Clock, Event, IdGen, LaunchConfig, RunId, RunState, Settings, SystemClock, UuidIdGen,
};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

const EVENT_CAPACITY: usize = 256;

struct ActiveRun {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

/// Owns the run state and the background task driving the current run.
///
/// At most one run is active. Starting a new run cancels the previous one;
/// abort and reset cancel the active run before applying their action, so a
/// still-unwinding engine can no longer write.
pub struct RunController<G, Q, C = SystemClock, I = UuidIdGen> {
    engine: Arc<PhaseEngine<G, Q>>,
    state: Arc<watch::Sender<RunState>>,
    events: broadcast::Sender<Event>,
    clock: C,
    id_gen: I,
    active: Mutex<Option<ActiveRun>>,
}

impl<G, Q, C, I> RunController<G, Q, C, I>
where
    G: CrawlerGateway,
    Q: QualityAdapter,
    C: Clock,
    I: IdGen,
{
    pub fn new(gateway: G, quality: Q, settings: &Settings, clock: C, id_gen: I) -> Self {
        let (state, _) = watch::channel(RunState::idle());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            engine: Arc::new(PhaseEngine::new(gateway, quality, settings)),
            state: Arc::new(state),
            events,
            clock,
            id_gen,
            active: Mutex::new(None),
        }
    }

    /// Start a fresh run in the background and return its id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, config: LaunchConfig) -> RunId {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = active.take() {
            tracing::info!("cancelling previous run");
            previous.token.cancel();
        }

        let run_id = self.id_gen.next();
        let token = CancellationToken::new();
        self.apply(Action::Start {
            run_id: run_id.clone(),
            config: config.clone(),
        });
        tracing::info!(
            %run_id,
            keywords = config.keywords.len(),
            sites = config.sites.len(),
            dry_run = config.dry_run,
            "run started"
        );

        let handle = RunHandle::new(
            Arc::clone(&self.state),
            self.events.clone(),
            self.clock.clone(),
            token.clone(),
        );
        let engine = Arc::clone(&self.engine);
        let span = tracing::info_span!("run", %run_id);
        let task = tokio::spawn(drive(engine, config, handle).instrument(span));

        *active = Some(ActiveRun {
            token,
            task: Some(task),
        });
        run_id
    }

    /// Cancel the active run and mark it aborted. No-op unless running.
    pub fn abort(&self) {
        self.cancel_active();
        if self.apply(Action::Abort {
            reason: Some("aborted by operator".to_string()),
        }) {
            tracing::info!("run aborted");
        }
    }

    /// Cancel any active run and return to idle
    pub fn reset(&self) {
        self.cancel_active();
        if self.apply(Action::Reset) {
            tracing::info!("run reset");
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RunState {
        self.state.borrow().clone()
    }

    /// Whole-state snapshots, one per applied action
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Reducer events from now on
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Wait for the background task of the latest run to finish
    pub async fn join(&self) {
        let task = {
            let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
            active.as_mut().and_then(|run| run.task.take())
        };
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "run driver failed");
            }
        }
    }

    fn cancel_active(&self) {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(run) = active.as_ref() {
            run.token.cancel();
        }
    }

    fn apply(&self, action: Action) -> bool {
        dispatch(&self.state, &self.events, &self.clock, action, None)
    }
}

/// Run the engine in its own task so a panic cannot escape unrecorded
async fn drive<G, Q, C>(engine: Arc<PhaseEngine<G, Q>>, config: LaunchConfig, run: RunHandle<C>)
where
    G: CrawlerGateway,
    Q: QualityAdapter,
    C: Clock,
{
    let inner = {
        let run = run.clone();
        tokio::spawn(async move { engine.run(&config, &run).await }.in_current_span())
    };

    match inner.await {
        Ok(Ok(outcome)) => tracing::info!(?outcome, "run finished"),
        Ok(Err(EngineError::Cancelled)) => tracing::debug!("run cancelled"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "run failed unexpectedly");
            run.apply(Action::Abort {
                reason: Some(e.to_string()),
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "run task panicked");
            run.apply(Action::Abort {
                reason: Some("internal error".to_string()),
            });
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
