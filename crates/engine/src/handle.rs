// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized writes to the shared run state

use sluice_core::{Action, Clock, Event, RunState, Traced};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

/// Apply one action to the shared state.
///
/// The whole state is replaced inside a single `send_if_modified`, so readers
/// never observe a half-applied transition. When `guard` is given and already
/// cancelled the action is dropped. Returns whether the state changed.
pub(crate) fn dispatch<C: Clock>(
    state: &watch::Sender<RunState>,
    events: &broadcast::Sender<Event>,
    clock: &C,
    action: Action,
    guard: Option<&CancellationToken>,
) -> bool {
    let name = action.name();
    let fields = action.fields();

    state.send_if_modified(|current| {
        if guard.is_some_and(CancellationToken::is_cancelled) {
            tracing::debug!(action = name, "dropped action from cancelled run");
            return false;
        }
        let (next, emitted) = current.transition(action, clock);
        if emitted.is_empty() {
            tracing::trace!(action = name, ?fields, "action ignored");
            return false;
        }
        *current = next;
        tracing::debug!(action = name, ?fields, "applied");
        for event in emitted {
            tracing::info!(event = event.name(), phase = ?event.phase(), "run event");
            // No subscribers is fine
            let _ = events.send(event);
        }
        true
    })
}

/// Write access to the run state for one engine run.
///
/// Bound to that run's cancellation token: once the token fires, every
/// further action is refused, so an engine that is still unwinding can never
/// overwrite an abort, a reset or a newer run.
#[derive(Clone)]
pub struct RunHandle<C> {
    state: Arc<watch::Sender<RunState>>,
    events: broadcast::Sender<Event>,
    clock: C,
    token: CancellationToken,
}

impl<C: Clock> RunHandle<C> {
    pub(crate) fn new(
        state: Arc<watch::Sender<RunState>>,
        events: broadcast::Sender<Event>,
        clock: C,
        token: CancellationToken,
    ) -> Self {
        Self {
            state,
            events,
            clock,
            token,
        }
    }

    /// Apply an action unless the run has been cancelled
    pub fn apply(&self, action: Action) -> bool {
        dispatch(
            &self.state,
            &self.events,
            &self.clock,
            action,
            Some(&self.token),
        )
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RunState {
        self.state.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_core::{FakeClock, LaunchConfig, PipelinePhase, RunId, RunStatus};

    fn handle() -> (RunHandle<FakeClock>, broadcast::Receiver<Event>) {
        let (state, _) = watch::channel(RunState::idle());
        let (events, rx) = broadcast::channel(16);
        let handle = RunHandle::new(
            Arc::new(state),
            events,
            FakeClock::new(),
            CancellationToken::new(),
        );
        (handle, rx)
    }

    #[test]
    fn applied_actions_broadcast_events() {
        let (handle, mut rx) = handle();
        assert!(handle.apply(Action::Start {
            run_id: RunId::from("run-1"),
            config: LaunchConfig::default(),
        }));
        assert!(handle.apply(Action::PhaseStarted {
            phase: PipelinePhase::Preflight
        }));

        assert!(matches!(rx.try_recv(), Ok(Event::RunStarted { .. })));
        assert!(matches!(
            rx.try_recv(),
            Ok(Event::PhaseStarted {
                phase: PipelinePhase::Preflight
            })
        ));
    }

    #[test]
    fn ignored_actions_report_no_change() {
        let (handle, mut rx) = handle();
        assert!(!handle.apply(Action::Complete));
        assert!(rx.try_recv().is_err());
        assert_eq!(handle.snapshot(), RunState::idle());
    }

    #[test]
    fn cancelled_handle_refuses_actions() {
        let (handle, _rx) = handle();
        handle.apply(Action::Start {
            run_id: RunId::from("run-1"),
            config: LaunchConfig::default(),
        });
        handle.token().cancel();

        assert!(!handle.apply(Action::PhaseStarted {
            phase: PipelinePhase::Preflight
        }));
        let state = handle.snapshot();
        assert_eq!(state.status, RunStatus::Running);
        assert_eq!(
            state.phase(PipelinePhase::Preflight).status,
            sluice_core::PhaseStatus::Pending
        );
    }
}
