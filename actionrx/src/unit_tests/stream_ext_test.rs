use crate::{ActionStreamExt, Async, StateStore};
use futures::StreamExt;
use futures::stream;
use std::time::Duration;

#[tokio::test]
async fn test_stop_if_includes_matching_item() {
    let items: Vec<i32> = stream::iter(1..10).stop_if(|&x| x == 3).collect().await;
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_stop_if_passes_through_short_stream() {
    let items: Vec<i32> = stream::iter(vec![1, 2]).stop_if(|&x| x > 5).collect().await;
    assert_eq!(items, vec![1, 2]);
}

#[tokio::test]
async fn test_stop_if_is_fused() {
    let mut stopped = stream::iter(vec![1, 2, 3]).stop_if(|&x| x == 1);
    assert_eq!(stopped.next().await, Some(1));
    assert_eq!(stopped.next().await, None);
    assert_eq!(stopped.next().await, None);
}

#[tokio::test]
async fn test_until_complete_on_store() {
    let store = StateStore::new(Async::<i32>::default());

    let writer = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.set_state(Async::start);
        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.set_state(|state| state.settle(Ok(5)));
        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.set_state(Async::start);
    });

    let states: Vec<Async<i32>> = store.to_stream().until_complete().collect().await;
    assert_eq!(
        states,
        vec![Async::Idle(None), Async::Loading(None), Async::success(5)]
    );
}
