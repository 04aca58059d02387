// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::resource::ResourceStatus;
use proptest::prelude::*;

fn mixed() -> Vec<TrackedResource> {
    vec![
        TrackedResource::draft("a"),
        TrackedResource::new("b", ResourceStatus::other("confirmed")),
        TrackedResource::draft("c"),
    ]
}

#[test]
fn counts_only_drafts() {
    let resources = mixed();
    assert_eq!(draft_count(&resources), 2);

    let drafts: Vec<&str> = draft_resources(&resources)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(drafts, vec!["a", "c"]);
}

#[test]
fn empty_collection_has_no_unsaved() {
    let mut classifier = DraftClassifier::new();
    let set = classifier.classify(&[]);
    assert!(!set.has_unsaved());
    assert_eq!(set.count(), 0);
}

#[test]
fn unchanged_collection_returns_same_arc() {
    let mut classifier = DraftClassifier::new();
    let first = classifier.classify(&mixed());
    let second = classifier.classify(&mixed());

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(classifier.recomputations(), 1);
}

#[test]
fn non_status_field_change_keeps_same_arc() {
    let mut classifier = DraftClassifier::new();
    let first = classifier.classify(&mixed());

    let mut edited = mixed();
    edited[0] = edited[0].clone().with_display_name("renamed");
    edited[1] = edited[1].clone().with_extra("qty", serde_json::json!(3));
    let second = classifier.classify(&edited);

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn status_change_produces_new_set() {
    let mut classifier = DraftClassifier::new();
    let first = classifier.classify(&mixed());

    let mut saved = mixed();
    saved[0].status = ResourceStatus::other("confirmed");
    let second = classifier.classify(&saved);

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.count(), 1);
    assert!(second.contains(&ResourceId::from("c")));
    assert_eq!(classifier.recomputations(), 2);
}

#[test]
fn removal_produces_new_set() {
    let mut classifier = DraftClassifier::new();
    classifier.classify(&mixed());

    let mut fewer = mixed();
    fewer.remove(2);
    let set = classifier.classify(&fewer);
    assert_eq!(set.ids(), &[ResourceId::from("a")]);
}

fn arb_resources() -> impl Strategy<Value = Vec<TrackedResource>> {
    prop::collection::vec((0u8..20, any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(n, draft)| {
                let status = if draft {
                    ResourceStatus::Draft
                } else {
                    ResourceStatus::other("confirmed")
                };
                TrackedResource::new(format!("r-{}", n), status)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn memoized_set_always_matches_fresh_classification(
        batches in prop::collection::vec(arb_resources(), 1..6)
    ) {
        let mut classifier = DraftClassifier::new();
        for resources in &batches {
            let set = classifier.classify(resources);
            prop_assert_eq!(set.count(), draft_count(resources));
            prop_assert_eq!(&*set, &DraftSet::from_resources(resources));
        }
    }

    #[test]
    fn repeated_classification_never_recomputes(resources in arb_resources()) {
        let mut classifier = DraftClassifier::new();
        let first = classifier.classify(&resources);
        let second = classifier.classify(&resources.clone());
        prop_assert!(Arc::ptr_eq(&first, &second));
        prop_assert_eq!(classifier.recomputations(), 1);
    }
}
