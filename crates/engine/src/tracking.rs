// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session state shared with background exit tasks
//!
//! [`Tracking`] re-derives guarding from the tracked collection and settles
//! exits. [`NoticeQueue`] delivers notices off the caller's path.

use crate::exit_flow::ExitFlow;
use crate::interceptor::Interceptor;
use crate::unload::UnloadGuard;
use dg_adapters::{Navigator, NotifyAdapter, ResourceSource, ViewAdapter};
use dg_core::{DraftClassifier, DraftSet, Effect, LifecycleEvent, Notice, ResourceId};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Default)]
struct Derived {
    classifier: DraftClassifier,
    last: Option<Arc<DraftSet>>,
}

pub(crate) struct Tracking<R, V, Nav> {
    source: R,
    flow: ExitFlow<V, R>,
    interceptor: Interceptor<Nav>,
    unload: Arc<UnloadGuard<V>>,
    derived: Arc<Mutex<Derived>>,
    focused: Arc<Mutex<Option<ResourceId>>>,
}

impl<R: Clone, V: Clone, Nav> Clone for Tracking<R, V, Nav> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            flow: self.flow.clone(),
            interceptor: self.interceptor.clone(),
            unload: Arc::clone(&self.unload),
            derived: Arc::clone(&self.derived),
            focused: Arc::clone(&self.focused),
        }
    }
}

impl<R, V, Nav> Tracking<R, V, Nav>
where
    R: ResourceSource,
    V: ViewAdapter,
    Nav: Navigator,
{
    pub(crate) fn new(
        source: R,
        flow: ExitFlow<V, R>,
        interceptor: Interceptor<Nav>,
        unload: Arc<UnloadGuard<V>>,
    ) -> Self {
        Self {
            source,
            flow,
            interceptor,
            unload,
            derived: Arc::new(Mutex::new(Derived::default())),
            focused: Arc::new(Mutex::new(None)),
        }
    }

    /// Re-derive guarding; does nothing when the draft set is unchanged
    pub(crate) fn refresh(&self) {
        let resources = self.source.list_tracked();
        let drafts = {
            let mut derived = self.derived.lock().unwrap_or_else(|e| e.into_inner());
            let drafts = derived.classifier.classify(&resources);
            if derived
                .last
                .as_ref()
                .is_some_and(|last| Arc::ptr_eq(last, &drafts))
            {
                return;
            }
            derived.last = Some(Arc::clone(&drafts));
            drafts
        };

        tracing::debug!(unsaved = drafts.count(), "tracked collection changed");
        let effects = self.flow.apply(LifecycleEvent::TrackedChanged {
            unsaved_count: drafts.count(),
        });
        for effect in effects {
            if let Effect::SetGuarding(guarding) = effect {
                self.interceptor.enable(guarding);
                self.unload.sync(guarding);
            }
        }
    }

    /// End a resolving exit; runs the captured navigation
    pub(crate) fn settle(&self) {
        self.flow.apply(LifecycleEvent::BulkSettled);
    }

    pub(crate) fn set_focus(&self, id: Option<ResourceId>) {
        *self.lock_focus() = id;
    }

    pub(crate) fn focused(&self) -> Option<ResourceId> {
        self.lock_focus().clone()
    }

    pub(crate) fn lock_focus(&self) -> MutexGuard<'_, Option<ResourceId>> {
        self.focused.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fire-and-forget notice delivery
pub(crate) struct NoticeQueue<N> {
    notify: N,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl<N: Clone> Clone for NoticeQueue<N> {
    fn clone(&self) -> Self {
        Self {
            notify: self.notify.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<N: NotifyAdapter> NoticeQueue<N> {
    pub(crate) fn new(notify: N) -> Self {
        Self {
            notify,
            in_flight: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deliver `notices` in order on a background task
    pub(crate) fn send(&self, notices: Vec<Notice>) {
        if notices.is_empty() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(count = notices.len(), "no async runtime, dropping notices");
            return;
        };
        let notify = self.notify.clone();
        let task = runtime.spawn(
            async move {
                for notice in notices {
                    if let Err(e) = notify.notify(notice).await {
                        tracing::warn!(error = %e, "notice delivery failed");
                    }
                }
            }
            .in_current_span(),
        );

        let mut in_flight = self.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(task);
    }

    /// Wait for every delivery started so far
    pub(crate) async fn flush(&self) {
        let tasks = std::mem::take(&mut *self.lock());
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "notice task failed");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "tracking_tests.rs"]
mod tests;
