// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dg_adapters::FakeNotifyAdapter;

fn messages(notify: &FakeNotifyAdapter) -> Vec<String> {
    notify.notices().into_iter().map(|n| n.message).collect()
}

#[tokio::test]
async fn notices_are_delivered_in_order() {
    let notify = FakeNotifyAdapter::new();
    let queue = NoticeQueue::new(notify.clone());

    queue.send(vec![Notice::success("Saved 2 drafts"), Notice::warning("1 failed")]);
    queue.flush().await;

    assert_eq!(messages(&notify), vec!["Saved 2 drafts", "1 failed"]);
}

#[tokio::test]
async fn failed_delivery_is_swallowed() {
    let notify = FakeNotifyAdapter::new();
    notify.set_failing(true);
    let queue = NoticeQueue::new(notify.clone());

    queue.send(vec![Notice::error("a"), Notice::error("b")]);
    queue.flush().await;

    assert_eq!(messages(&notify), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn send_returns_while_the_notifier_hangs() {
    let notify = FakeNotifyAdapter::new();
    notify.set_hanging(true);
    let queue = NoticeQueue::new(notify.clone());

    queue.send(vec![Notice::success("x")]);
    tokio::task::yield_now().await;

    assert_eq!(messages(&notify), vec!["x"]);
}

#[test]
fn send_outside_a_runtime_drops_notices() {
    let notify = FakeNotifyAdapter::new();
    let queue = NoticeQueue::new(notify.clone());

    queue.send(vec![Notice::success("x")]);

    assert!(notify.notices().is_empty());
}
