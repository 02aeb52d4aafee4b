use std::time::Duration;

use actionrx::Async;

mod common;

#[tokio::test(start_paused = true)]
async fn test_started_earlier_settles_later_wins() {
    let harness = common::scripted::<&'static str>();
    harness
        .script
        .respond_ok("A", Duration::from_millis(100))
        .respond_ok("B", Duration::from_millis(10));

    let a = harness.runner.invoke(());
    let b = harness.runner.invoke(());
    b.await;
    assert_eq!(harness.runner.state(), Async::success("B"));
    a.await;

    assert_eq!(harness.runner.state(), Async::success("A"));
    assert_eq!(harness.script.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_settlement_of_fast_call_clears_loading_while_slow_call_runs() {
    let harness = common::scripted::<u8>();
    harness
        .script
        .respond_ok(1, Duration::from_millis(100))
        .respond_ok(2, Duration::from_millis(10));

    let slow = harness.runner.invoke(());
    harness.runner.invoke(()).await;

    // the slow call is still in flight but nothing tracks it
    assert!(!slow.is_finished());
    assert!(!harness.runner.is_loading());

    slow.await;
    assert_eq!(harness.runner.data(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_stale_error_lands_after_success() {
    let harness = common::scripted::<u8>();
    harness
        .script
        .respond_err("timed out upstream", Duration::from_millis(100))
        .respond_ok(9, Duration::from_millis(10));

    let slow = harness.runner.invoke(());
    harness.runner.invoke(()).await;
    slow.await;

    assert_eq!(
        harness.runner.state(),
        Async::fail_with_message("timed out upstream", Some(9))
    );
    assert_eq!(harness.notifier.count(), 1);
}
