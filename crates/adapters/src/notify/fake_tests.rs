// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_notify_records_notices() {
    let adapter = FakeNotifyAdapter::new();

    adapter.notify(Notice::success("Saved 2 drafts")).await.unwrap();
    adapter
        .notify(Notice::warning("Could not save 1 draft (1 failed)"))
        .await
        .unwrap();

    let notices = adapter.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].message, "Saved 2 drafts");
    assert_eq!(adapter.at_level(NoticeLevel::Warning).len(), 1);
}

#[tokio::test]
async fn failing_fake_still_records() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_failing(true);

    assert!(adapter.notify(Notice::error("x")).await.is_err());
    assert_eq!(adapter.notices().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn hanging_fake_never_completes() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_hanging(true);

    let delivery = tokio::time::timeout(
        std::time::Duration::from_secs(3600),
        adapter.notify(Notice::success("x")),
    )
    .await;

    assert!(delivery.is_err());
    assert_eq!(adapter.notices().len(), 1);
}
