// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit flow: binds captured navigations to the lifecycle state machine
//!
//! Owns the [`LifecycleState`] and the one-shot [`Proceed`] of the pending
//! attempt. Synchronous effects are carried out here; `RunBulk` and
//! `SetGuarding` are handed back to the caller.

use crate::error::SessionError;
use crate::interceptor::Proceed;
use dg_adapters::{ResourceSource, ViewAdapter};
use dg_core::{
    draft_resources, Destination, Effect, ExitPhase, LifecycleEvent, LifecycleState, ResourceId,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct FlowState {
    lifecycle: LifecycleState,
    /// Proceed for `lifecycle.pending`, keyed by attempt number
    stored: Option<(u64, Proceed)>,
}

/// Work to do once the state lock is released
enum Action {
    Run(u64, Proceed),
    OpenConfirm,
    CloseConfirm,
}

/// Exit flow shared between the interceptor handler and the session
pub struct ExitFlow<V, R> {
    state: Arc<Mutex<FlowState>>,
    view: V,
    source: R,
}

impl<V: Clone, R: Clone> Clone for ExitFlow<V, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            view: self.view.clone(),
            source: self.source.clone(),
        }
    }
}

impl<V: ViewAdapter, R: ResourceSource> ExitFlow<V, R> {
    pub fn new(view: V, source: R) -> Self {
        Self {
            state: Arc::new(Mutex::new(FlowState::default())),
            view,
            source,
        }
    }

    /// Snapshot of the lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.lock().lifecycle.clone()
    }

    pub fn phase(&self) -> ExitPhase {
        self.lock().lifecycle.phase
    }

    /// True while a captured navigation is waiting on the user's choice
    #[cfg(test)]
    pub(crate) fn has_pending(&self) -> bool {
        self.lock().stored.is_some()
    }

    /// Feed a captured navigation attempt into the flow
    pub fn attempt(&self, destination: Destination, proceed: Proceed) {
        let actions = {
            let mut state = self.lock();
            let attempt = state.lifecycle.next_attempt();
            tracing::debug!(attempt, %destination, phase = %state.lifecycle.phase, "navigation attempt");
            let (actions, _) = Self::step(
                &mut state,
                LifecycleEvent::NavigationAttempted { destination },
                Some((attempt, proceed)),
            );
            actions
        };
        self.perform(actions);
    }

    /// Apply an event; returns the effects the caller must carry out
    pub fn apply(&self, event: LifecycleEvent) -> Vec<Effect> {
        let (actions, rest) = {
            let mut state = self.lock();
            Self::step(&mut state, event, None)
        };
        self.perform(actions);
        rest
    }

    /// Mark `id` busy if a single-resource action is allowed right now
    pub(crate) fn begin_single(&self, id: &ResourceId) -> Result<BusyGuard<V, R>, SessionError> {
        let mut state = self.lock();
        let lifecycle = &state.lifecycle;
        if !lifecycle.single_action_allowed() {
            return Err(match &lifecycle.busy {
                Some(busy) if lifecycle.is_idle() => SessionError::Busy(busy.clone()),
                _ => SessionError::ExitInProgress,
            });
        }
        Self::step(
            &mut state,
            LifecycleEvent::SingleStarted { id: id.clone() },
            None,
        );
        Ok(BusyGuard {
            flow: self.clone(),
            id: id.clone(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn step(
        state: &mut FlowState,
        event: LifecycleEvent,
        incoming: Option<(u64, Proceed)>,
    ) -> (Vec<Action>, Vec<Effect>) {
        let (next, effects) = state.lifecycle.transition(event);
        state.lifecycle = next;

        let mut slots: Vec<(u64, Proceed)> = state.stored.take().into_iter().collect();
        slots.extend(incoming);

        let mut actions = Vec::new();
        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                Effect::Proceed { attempt } => match take_slot(&mut slots, attempt) {
                    Some(proceed) => actions.push(Action::Run(attempt, proceed)),
                    None => tracing::warn!(attempt, "no proceed stored for attempt"),
                },
                Effect::Discard { attempt } => {
                    if take_slot(&mut slots, attempt).is_some() {
                        tracing::debug!(attempt, "navigation discarded");
                    }
                }
                Effect::OpenConfirm => actions.push(Action::OpenConfirm),
                Effect::CloseConfirm => actions.push(Action::CloseConfirm),
                other => rest.push(other),
            }
        }

        // Keep only the proceed belonging to the pending attempt
        let pending = state.lifecycle.pending.as_ref().map(|p| p.attempt);
        state.stored = pending.and_then(|attempt| {
            take_slot(&mut slots, attempt).map(|proceed| (attempt, proceed))
        });

        (actions, rest)
    }

    fn perform(&self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Run(attempt, proceed) => {
                    tracing::info!(attempt, "navigation proceeding");
                    proceed.run();
                }
                Action::OpenConfirm => {
                    let tracked = self.source.list_tracked();
                    let drafts: Vec<_> = draft_resources(&tracked).into_iter().cloned().collect();
                    tracing::info!(drafts = drafts.len(), "exit confirmation opened");
                    self.view.open_confirm(&drafts);
                }
                Action::CloseConfirm => self.view.close_confirm(),
            }
        }
    }
}

fn take_slot(slots: &mut Vec<(u64, Proceed)>, attempt: u64) -> Option<Proceed> {
    let index = slots.iter().position(|(a, _)| *a == attempt)?;
    Some(slots.swap_remove(index).1)
}

/// Clears the busy flag when dropped, on every exit path
pub(crate) struct BusyGuard<V: ViewAdapter, R: ResourceSource> {
    flow: ExitFlow<V, R>,
    id: ResourceId,
}

impl<V: ViewAdapter, R: ResourceSource> Drop for BusyGuard<V, R> {
    fn drop(&mut self) {
        self.flow.apply(LifecycleEvent::SingleFinished {
            id: self.id.clone(),
        });
    }
}

#[cfg(test)]
#[path = "exit_flow_tests.rs"]
mod tests;
