// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dg_adapters::{FakeViewAdapter, SharedResourceList, ViewCall};
use dg_core::{BulkOperation, TrackedResource};
use std::sync::atomic::{AtomicUsize, Ordering};

struct Harness {
    flow: ExitFlow<FakeViewAdapter, SharedResourceList>,
    view: FakeViewAdapter,
    runs: Arc<Mutex<Vec<&'static str>>>,
}

impl Harness {
    fn with_drafts(count: usize) -> Self {
        let resources = (0..count)
            .map(|i| TrackedResource::draft(format!("d{}", i)))
            .collect();
        let view = FakeViewAdapter::new();
        let flow = ExitFlow::new(view.clone(), SharedResourceList::new(resources));
        flow.apply(LifecycleEvent::TrackedChanged {
            unsaved_count: count,
        });
        Self {
            flow,
            view,
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn attempt(&self, label: &'static str) {
        let runs = Arc::clone(&self.runs);
        self.flow.attempt(
            Destination::Push(format!("/{}", label)),
            Proceed::new(move || runs.lock().unwrap().push(label)),
        );
    }

    fn runs(&self) -> Vec<&'static str> {
        self.runs.lock().unwrap().clone()
    }
}

#[test]
fn attempt_without_drafts_proceeds_immediately() {
    let h = Harness::with_drafts(0);

    h.attempt("a");

    assert_eq!(h.runs(), vec!["a"]);
    assert_eq!(h.flow.phase(), ExitPhase::Idle);
    assert!(h.view.calls().is_empty());
}

#[test]
fn attempt_with_drafts_opens_confirmation() {
    let h = Harness::with_drafts(2);

    h.attempt("a");

    assert!(h.runs().is_empty());
    assert_eq!(h.flow.phase(), ExitPhase::Confirming);
    assert!(h.flow.has_pending());
    assert_eq!(
        h.view.calls(),
        vec![ViewCall::OpenConfirm {
            drafts: vec![ResourceId::new("d0"), ResourceId::new("d1")]
        }]
    );
}

#[test]
fn second_attempt_replaces_the_first() {
    let h = Harness::with_drafts(1);

    h.attempt("first");
    h.attempt("second");
    let effects = h.flow.apply(LifecycleEvent::SaveAndExit);
    h.flow.apply(LifecycleEvent::BulkSettled);

    assert_eq!(
        effects,
        vec![Effect::RunBulk {
            operation: BulkOperation::Save
        }]
    );
    assert_eq!(h.runs(), vec!["second"]);
    assert_eq!(h.view.confirm_count(), 1);
}

#[test]
fn stay_discards_and_closes() {
    let h = Harness::with_drafts(1);

    h.attempt("a");
    let effects = h.flow.apply(LifecycleEvent::Stay);

    assert!(effects.is_empty());
    assert!(h.runs().is_empty());
    assert!(!h.flow.has_pending());
    assert_eq!(h.flow.phase(), ExitPhase::Idle);
    assert!(!h.view.confirm_open());
}

#[test]
fn attempt_while_resolving_is_dropped() {
    let h = Harness::with_drafts(1);

    h.attempt("a");
    h.flow.apply(LifecycleEvent::ExitWithoutSaving);
    h.attempt("b");
    h.flow.apply(LifecycleEvent::BulkSettled);

    assert_eq!(h.runs(), vec!["a"]);
    assert_eq!(h.flow.phase(), ExitPhase::Idle);
}

#[test]
fn settled_twice_proceeds_once() {
    let h = Harness::with_drafts(1);
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    h.flow.attempt(
        Destination::Back,
        Proceed::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    h.flow.apply(LifecycleEvent::SaveAndExit);
    h.flow.apply(LifecycleEvent::BulkSettled);
    h.flow.apply(LifecycleEvent::BulkSettled);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn busy_guard_clears_on_drop() {
    let h = Harness::with_drafts(1);
    let id = ResourceId::new("d0");

    let guard = h.flow.begin_single(&id).unwrap();
    assert_eq!(h.flow.state().busy, Some(id.clone()));
    assert!(matches!(
        h.flow.begin_single(&ResourceId::new("other")),
        Err(SessionError::Busy(busy)) if busy == id
    ));

    drop(guard);
    assert_eq!(h.flow.state().busy, None);
}

#[test]
fn single_action_rejected_during_exit() {
    let h = Harness::with_drafts(1);
    h.attempt("a");

    assert!(matches!(
        h.flow.begin_single(&ResourceId::new("d0")),
        Err(SessionError::ExitInProgress)
    ));
}

#[test]
fn exit_choice_ignored_while_busy() {
    let h = Harness::with_drafts(1);
    let guard = h.flow.begin_single(&ResourceId::new("d0")).unwrap();
    // Attempts still open the dialog while busy
    h.attempt("a");

    assert!(h.flow.apply(LifecycleEvent::SaveAndExit).is_empty());
    assert_eq!(h.flow.phase(), ExitPhase::Confirming);

    drop(guard);
    assert_eq!(
        h.flow.apply(LifecycleEvent::SaveAndExit),
        vec![Effect::RunBulk {
            operation: BulkOperation::Save
        }]
    );
}
