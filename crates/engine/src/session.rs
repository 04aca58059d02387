// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded workflow session
//!
//! One `GuardSession` per mounted workflow. It wires the interceptor, the
//! exit flow, the bulk coordinator and the unload guard around the
//! injected adapters, and tears everything down on unmount.

use crate::bulk::{settle_all, BulkCoordinator};
use crate::cleanup::{spawn_cleanup, CleanupReport};
use crate::error::{OperationError, SessionError};
use crate::exit_flow::ExitFlow;
use crate::interceptor::Interceptor;
use crate::tracking::{NoticeQueue, Tracking};
use crate::unload::UnloadGuard;
use dg_adapters::{
    Navigator, NotifyAdapter, ResourceApi, ResourceSource, SelectionChange, ViewAdapter,
};
use dg_core::{
    draft_resources, notices_for, pick_next, BulkOperation, BulkReport, Effect, ExitPhase,
    GuardConfig, LifecycleEvent, LifecycleState, LinkDisposition, LinkTarget, Notice, ResourceId,
    Successor,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Session adapter dependencies
pub struct SessionDeps<A, R, N, V, Nav> {
    pub api: A,
    pub source: R,
    pub notify: N,
    pub view: V,
    pub navigator: Nav,
}

/// Coordinator for one mounted workflow
pub struct GuardSession<A, R, N, V, Nav>
where
    A: ResourceApi,
    R: ResourceSource,
    N: NotifyAdapter,
    V: ViewAdapter,
    Nav: Navigator,
{
    api: A,
    source: R,
    view: V,
    interceptor: Interceptor<Nav>,
    flow: ExitFlow<V, R>,
    bulk: BulkCoordinator<A, R>,
    unload: Arc<UnloadGuard<V>>,
    tracking: Tracking<R, V, Nav>,
    notices: NoticeQueue<N>,
    config: GuardConfig,
    unmounted: AtomicBool,
}

impl<A, R, N, V, Nav> GuardSession<A, R, N, V, Nav>
where
    A: ResourceApi,
    R: ResourceSource,
    N: NotifyAdapter,
    V: ViewAdapter,
    Nav: Navigator,
{
    pub fn new(deps: SessionDeps<A, R, N, V, Nav>, config: GuardConfig) -> Self {
        let flow = ExitFlow::new(deps.view.clone(), deps.source.clone());
        let interceptor = Interceptor::new(deps.navigator);
        let handler_flow = flow.clone();
        interceptor.on_attempt(move |destination, proceed| {
            handler_flow.attempt(destination, proceed);
        });

        let unload = Arc::new(UnloadGuard::new(deps.view.clone()));
        let tracking = Tracking::new(
            deps.source.clone(),
            flow.clone(),
            interceptor.clone(),
            Arc::clone(&unload),
        );

        Self {
            bulk: BulkCoordinator::new(deps.api.clone(), deps.source.clone(), config.bulk.clone()),
            api: deps.api,
            source: deps.source,
            view: deps.view,
            interceptor,
            flow,
            unload,
            tracking,
            notices: NoticeQueue::new(deps.notify),
            config,
            unmounted: AtomicBool::new(false),
        }
    }

    /// Install the interceptor and derive the initial state
    pub fn mount(&self) {
        self.interceptor.install();
        self.refresh();
        tracing::info!(unsaved = self.unsaved_count(), "session mounted");
    }

    /// Re-derive state from the tracked collection.
    ///
    /// Call after every change to the collection. Does nothing when the
    /// draft set is unchanged.
    pub fn refresh(&self) {
        self.tracking.refresh();
    }

    /// Navigation entry point; all routed navigation goes through here
    pub fn navigator(&self) -> &Interceptor<Nav> {
        &self.interceptor
    }

    /// Offer a link click; `Intercepted` means suppress the default action
    pub fn click(&self, link: &LinkTarget) -> LinkDisposition {
        self.interceptor.click(link)
    }

    pub fn state(&self) -> LifecycleState {
        self.flow.state()
    }

    pub fn phase(&self) -> ExitPhase {
        self.flow.phase()
    }

    pub fn unsaved_count(&self) -> usize {
        self.flow.state().unsaved_count
    }

    pub fn is_guarding(&self) -> bool {
        self.interceptor.is_guarding()
    }

    pub fn set_focus(&self, id: Option<ResourceId>) {
        self.tracking.set_focus(id);
    }

    pub fn focused(&self) -> Option<ResourceId> {
        self.tracking.focused()
    }

    /// Wait until every notice sent so far has been delivered
    pub async fn flush_notices(&self) {
        self.notices.flush().await;
    }

    /// Cancel the exit; the captured navigation never happens
    pub fn stay(&self) -> Result<(), SessionError> {
        if self.phase() != ExitPhase::Confirming {
            return Err(SessionError::NotConfirming);
        }
        tracing::info!("exit cancelled");
        self.flow.apply(LifecycleEvent::Stay);
        Ok(())
    }

    /// Delete every draft, then perform the captured navigation
    pub async fn exit_without_saving(&self) -> Result<BulkReport, SessionError> {
        self.resolve(LifecycleEvent::ExitWithoutSaving).await
    }

    /// Save every draft, then perform the captured navigation
    pub async fn save_and_exit(&self) -> Result<BulkReport, SessionError> {
        self.resolve(LifecycleEvent::SaveAndExit).await
    }

    // The captured navigation runs once the report is complete, whatever it
    // says. The bulk run and the settle step live in their own task, so
    // dropping this future mid-exit still finishes the exit.
    async fn resolve(&self, choice: LifecycleEvent) -> Result<BulkReport, SessionError> {
        let state = self.flow.state();
        match state.phase {
            ExitPhase::Idle => return Err(SessionError::NotConfirming),
            ExitPhase::Resolving(_) => return Err(SessionError::ExitInProgress),
            ExitPhase::Confirming => {}
        }
        if let Some(busy) = state.busy {
            return Err(SessionError::Busy(busy));
        }

        let operation = self
            .flow
            .apply(choice)
            .into_iter()
            .find_map(|effect| match effect {
                Effect::RunBulk { operation } => Some(operation),
                _ => None,
            })
            .ok_or(SessionError::NotConfirming)?;

        let tracked = self.source.list_tracked();
        let drafts: Vec<_> = draft_resources(&tracked).into_iter().cloned().collect();
        let bulk = self.bulk.clone();
        let tracking = self.tracking.clone();
        let notices = self.notices.clone();
        let settle = tokio::spawn(
            async move {
                let report = bulk.run_bulk(operation, &drafts).await;
                tracking.refresh();
                tracking.settle();
                notices.send(notices_for(&report));
                report
            }
            .in_current_span(),
        );

        settle.await.map_err(|e| {
            tracing::error!(error = %e, "exit task failed");
            self.tracking.settle();
            SessionError::ExitTask(e.to_string())
        })
    }

    /// Save one draft
    pub async fn save_one(&self, id: &ResourceId) -> Result<(), SessionError> {
        self.single(BulkOperation::Save, id).await
    }

    /// Delete one resource; deleting an untracked id is a no-op
    pub async fn delete_one(&self, id: &ResourceId) -> Result<(), SessionError> {
        self.single(BulkOperation::Delete, id).await
    }

    async fn single(&self, operation: BulkOperation, id: &ResourceId) -> Result<(), SessionError> {
        let span = tracing::info_span!("session.single", %operation, id = %id);
        self.run_single(operation, id).instrument(span).await
    }

    async fn run_single(
        &self,
        operation: BulkOperation,
        id: &ResourceId,
    ) -> Result<(), SessionError> {
        let tracked = self.source.list_tracked();
        let Some(resource) = tracked.iter().find(|r| &r.id == id) else {
            return match operation {
                BulkOperation::Delete => {
                    tracing::debug!("not tracked, nothing to delete");
                    Ok(())
                }
                BulkOperation::Save => Err(SessionError::NotTracked(id.clone())),
            };
        };
        let label = resource.label().to_string();

        let busy = self.flow.begin_single(id)?;
        let budget = self.config.bulk.timeout_for(operation);
        let result = settle_all(&self.api, operation, vec![id.clone()], budget)
            .await
            .pop()
            .map(|(_, result)| result)
            .unwrap_or(Err(OperationError::Transport("no result".to_string())));

        let result = match result {
            Err(e) if operation == BulkOperation::Delete && e.is_not_found() => Ok(()),
            other => other,
        };

        match result {
            Ok(()) => {
                self.source.remove(std::slice::from_ref(id));
                drop(busy);
                tracing::info!("succeeded");
                self.refresh();
                self.reselect(id);
                self.notices
                    .send(vec![Notice::single_succeeded(operation, &label)]);
                Ok(())
            }
            Err(source) => {
                drop(busy);
                tracing::warn!(error = %source, "failed");
                self.notices.send(vec![Notice::single_failed(
                    operation,
                    &label,
                    &source.to_string(),
                )]);
                Err(SessionError::Operation {
                    id: id.clone(),
                    source,
                })
            }
        }
    }

    /// Move focus off a removed resource
    fn reselect(&self, removed: &ResourceId) {
        let tracked = self.source.list_tracked();
        let change = {
            let mut focused = self.tracking.lock_focus();
            if focused.as_ref() != Some(removed) {
                return;
            }
            match pick_next(&tracked, removed) {
                Successor::Resource(next) => {
                    *focused = Some(next.clone());
                    SelectionChange::Focus(next)
                }
                Successor::Fallback => {
                    *focused = None;
                    SelectionChange::Navigate(self.config.fallback_route.clone())
                }
            }
        };
        tracing::debug!(?change, "focus moved");
        self.view.select(change);
    }

    /// Tear the session down; repeated calls do nothing.
    ///
    /// Drafts still tracked are deleted in the background unless an exit
    /// is already resolving them. The handle is only for observing the
    /// cleanup; dropping it does not stop it.
    pub fn unmount(&self) -> Option<JoinHandle<CleanupReport>> {
        if self.unmounted.swap(true, Ordering::SeqCst) {
            return None;
        }
        self.interceptor.uninstall();
        self.unload.teardown();

        let state = self.flow.state();
        if state.phase == ExitPhase::Confirming {
            self.flow.apply(LifecycleEvent::Stay);
        }
        tracing::info!(unsaved = state.unsaved_count, phase = %state.phase, "session unmounted");

        if !state.has_unsaved() || matches!(state.phase, ExitPhase::Resolving(_)) {
            return None;
        }
        let tracked = self.source.list_tracked();
        let ids = draft_resources(&tracked)
            .into_iter()
            .map(|r| r.id.clone())
            .collect();
        spawn_cleanup(
            self.api.clone(),
            self.source.clone(),
            ids,
            self.config.cleanup.clone(),
        )
    }

}

impl<A, R, N, V, Nav> Drop for GuardSession<A, R, N, V, Nav>
where
    A: ResourceApi,
    R: ResourceSource,
    N: NotifyAdapter,
    V: ViewAdapter,
    Nav: Navigator,
{
    fn drop(&mut self) {
        if !self.unmounted.swap(true, Ordering::SeqCst) {
            self.interceptor.uninstall();
            self.unload.teardown();
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
