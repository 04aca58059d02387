// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle state machine for a guarded workflow session
//!
//! Tracks the unsaved count, the exit confirmation phase, the captured
//! navigation attempt and the busy resource. Transitions are pure and
//! return the effects the engine must carry out.

use crate::bulk::BulkOperation;
use crate::navigation::Destination;
use crate::resource::ResourceId;

/// Where the session is in the exit flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitPhase {
    /// No pending navigation
    #[default]
    Idle,
    /// Confirmation surface open, waiting for the user's choice
    Confirming,
    /// Bulk operation running; the captured navigation follows it
    Resolving(BulkOperation),
}

impl std::fmt::Display for ExitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitPhase::Idle => write!(f, "idle"),
            ExitPhase::Confirming => write!(f, "confirming"),
            ExitPhase::Resolving(op) => write!(f, "resolving({})", op),
        }
    }
}

/// A captured navigation attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNavigation {
    /// Monotonic attempt number, used to pair effects with the stored proceed
    pub attempt: u64,
    pub destination: Destination,
}

/// Events that can change lifecycle state
#[derive(Clone, Debug)]
pub enum LifecycleEvent {
    /// The tracked collection changed
    TrackedChanged { unsaved_count: usize },
    /// The interceptor captured a navigation attempt
    NavigationAttempted { destination: Destination },
    /// User cancelled the exit
    Stay,
    /// User chose to leave, discarding all drafts
    ExitWithoutSaving,
    /// User chose to leave, saving all drafts
    SaveAndExit,
    /// The bulk operation for the exit has fully settled
    BulkSettled,
    /// A single-resource operation began
    SingleStarted { id: ResourceId },
    /// A single-resource operation ended, whatever the outcome
    SingleFinished { id: ResourceId },
}

/// Effects requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run the proceed captured for `attempt`
    Proceed { attempt: u64 },
    /// Drop the proceed captured for `attempt` without running it
    Discard { attempt: u64 },
    OpenConfirm,
    CloseConfirm,
    RunBulk { operation: BulkOperation },
    /// Enable or disable navigation guarding and the unload prompt
    SetGuarding(bool),
}

/// Lifecycle state for one mounted session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecycleState {
    pub unsaved_count: usize,
    pub phase: ExitPhase,
    pub pending: Option<PendingNavigation>,
    pub busy: Option<ResourceId>,
    next_attempt: u64,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_unsaved(&self) -> bool {
        self.unsaved_count > 0
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ExitPhase::Idle
    }

    /// Single-resource actions are only allowed when idle and not busy
    pub fn single_action_allowed(&self) -> bool {
        self.is_idle() && self.busy.is_none()
    }

    /// Attempt number the next captured navigation will receive
    pub fn next_attempt(&self) -> u64 {
        self.next_attempt
    }

    /// Phase and pending navigation agree
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        match self.phase {
            ExitPhase::Idle => self.pending.is_none(),
            ExitPhase::Confirming | ExitPhase::Resolving(_) => self.pending.is_some(),
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: LifecycleEvent) -> (LifecycleState, Vec<Effect>) {
        match (&self.phase, event) {
            (_, LifecycleEvent::TrackedChanged { unsaved_count }) => {
                let was_guarding = self.has_unsaved();
                let state = LifecycleState {
                    unsaved_count,
                    ..self.clone()
                };
                let effects = if was_guarding != state.has_unsaved() {
                    vec![Effect::SetGuarding(state.has_unsaved())]
                } else {
                    vec![]
                };
                (state, effects)
            }

            // Idle: nothing to lose, let it through; otherwise ask
            (ExitPhase::Idle, LifecycleEvent::NavigationAttempted { destination }) => {
                let attempt = self.next_attempt;
                if !self.has_unsaved() {
                    let state = LifecycleState {
                        next_attempt: attempt + 1,
                        ..self.clone()
                    };
                    return (state, vec![Effect::Proceed { attempt }]);
                }
                let state = LifecycleState {
                    phase: ExitPhase::Confirming,
                    pending: Some(PendingNavigation {
                        attempt,
                        destination,
                    }),
                    next_attempt: attempt + 1,
                    ..self.clone()
                };
                (state, vec![Effect::OpenConfirm])
            }

            // Confirming: last attempt wins, dialog stays open
            (ExitPhase::Confirming, LifecycleEvent::NavigationAttempted { destination }) => {
                let attempt = self.next_attempt;
                let replaced = self.pending.as_ref().map(|p| p.attempt);
                let state = LifecycleState {
                    pending: Some(PendingNavigation {
                        attempt,
                        destination,
                    }),
                    next_attempt: attempt + 1,
                    ..self.clone()
                };
                let effects = replaced
                    .map(|attempt| vec![Effect::Discard { attempt }])
                    .unwrap_or_default();
                (state, effects)
            }

            // Resolving: the exit is already under way
            (ExitPhase::Resolving(_), LifecycleEvent::NavigationAttempted { .. }) => {
                let attempt = self.next_attempt;
                let state = LifecycleState {
                    next_attempt: attempt + 1,
                    ..self.clone()
                };
                (state, vec![Effect::Discard { attempt }])
            }

            (ExitPhase::Confirming, LifecycleEvent::Stay) => {
                let mut effects = Vec::new();
                if let Some(pending) = &self.pending {
                    effects.push(Effect::Discard {
                        attempt: pending.attempt,
                    });
                }
                effects.push(Effect::CloseConfirm);
                let state = LifecycleState {
                    phase: ExitPhase::Idle,
                    pending: None,
                    ..self.clone()
                };
                (state, effects)
            }

            (ExitPhase::Confirming, LifecycleEvent::ExitWithoutSaving) if self.busy.is_none() => {
                self.begin_resolving(BulkOperation::Delete)
            }

            (ExitPhase::Confirming, LifecycleEvent::SaveAndExit) if self.busy.is_none() => {
                self.begin_resolving(BulkOperation::Save)
            }

            (ExitPhase::Resolving(_), LifecycleEvent::BulkSettled) => {
                let effects = self
                    .pending
                    .as_ref()
                    .map(|p| vec![Effect::Proceed { attempt: p.attempt }])
                    .unwrap_or_default();
                let state = LifecycleState {
                    phase: ExitPhase::Idle,
                    pending: None,
                    ..self.clone()
                };
                (state, effects)
            }

            (ExitPhase::Idle, LifecycleEvent::SingleStarted { id }) if self.busy.is_none() => {
                let state = LifecycleState {
                    busy: Some(id),
                    ..self.clone()
                };
                (state, vec![])
            }

            (_, LifecycleEvent::SingleFinished { id }) if self.busy.as_ref() == Some(&id) => {
                let state = LifecycleState {
                    busy: None,
                    ..self.clone()
                };
                (state, vec![])
            }

            // Invalid transitions - no change
            _ => (self.clone(), vec![]),
        }
    }

    fn begin_resolving(&self, operation: BulkOperation) -> (LifecycleState, Vec<Effect>) {
        let state = LifecycleState {
            phase: ExitPhase::Resolving(operation),
            ..self.clone()
        };
        (
            state,
            vec![Effect::CloseConfirm, Effect::RunBulk { operation }],
        )
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
