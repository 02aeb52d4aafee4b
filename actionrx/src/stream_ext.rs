use crate::Async;
use futures_core::stream::{FusedStream, Stream};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream adapters for observing runner state.
pub trait ActionStreamExt: Stream {
    /// Yields items until one matches `test`; that item is still yielded,
    /// then the stream ends.
    ///
    /// ```
    /// use actionrx::ActionStreamExt;
    /// use futures_signals::signal::SignalExt;
    ///
    /// async fn example() {
    ///     let stream = futures_signals::signal::always(0)
    ///         .to_stream()
    ///         .stop_if(|&value| value >= 0);
    /// }
    /// ```
    fn stop_if<F>(self, test: F) -> StopIf<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        StopIf {
            stream: self,
            done: false,
            test,
        }
    }

    /// Ends the stream after the first `Success` or `Fail` state.
    fn until_complete<T>(self) -> StopIf<Self, fn(&Async<T>) -> bool>
    where
        T: Clone,
        Self: Stream<Item = Async<T>> + Sized,
    {
        self.stop_if(Async::is_complete as fn(&Async<T>) -> bool)
    }
}

impl<S: ?Sized> ActionStreamExt for S where S: Stream {}

#[pin_project(project = StopIfProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct StopIf<S, F> {
    #[pin]
    stream: S,
    done: bool,
    test: F,
}

impl<S, F> Stream for StopIf<S, F>
where
    S: Stream,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let StopIfProj { stream, done, test } = self.project();
        if *done {
            return Poll::Ready(None);
        }
        let next = match stream.poll_next(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(next) => next,
        };
        *done = next.as_ref().map_or(true, |item| test(item));
        Poll::Ready(next)
    }
}

impl<S, F> FusedStream for StopIf<S, F>
where
    S: Stream,
    F: FnMut(&S::Item) -> bool,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}
