use crate::{Async, State};
use futures_core::Stream;
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::future::poll_fn;
use std::pin::pin;

impl<T> State for Async<T> where T: Clone + Send + Sync + 'static {}

/// Shared, observable cell holding a state value.
///
/// Cloning a store yields another handle on the same state. Every reducer runs
/// under the cell's write lock, so concurrent writers never interleave inside
/// one update, and observers are woken once per reducer.
pub struct StateStore<S> {
    state: Mutable<S>,
}

impl<S> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        StateStore {
            state: self.state.clone(),
        }
    }
}

impl<S: State> StateStore<S> {
    pub fn new(initial_state: S) -> Self {
        StateStore {
            state: Mutable::new(initial_state),
        }
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<S>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<S> {
        self.state.signal_cloned()
    }

    /// Applies `reducer` to the current state and publishes the result.
    pub fn set_state<F>(&self, reducer: F)
    where
        F: FnOnce(S) -> S,
    {
        let mut lock = self.state.lock_mut();
        let new_state = reducer(lock.clone());
        *lock = new_state;
    }

    /// Reads the current state by reference.
    pub fn with_state<F, R>(&self, action: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        action(&self.state.lock_ref())
    }

    pub fn get_state(&self) -> S {
        self.state.get_cloned()
    }

    /// Resolves with the first observed state that satisfies `predicate`,
    /// starting with the current one.
    pub async fn await_state<P>(&self, mut predicate: P) -> S
    where
        P: FnMut(&S) -> bool,
    {
        let mut stream = pin!(self.to_stream());
        while let Some(state) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
            if predicate(&state) {
                return state;
            }
        }
        // the stream only ends once every handle is gone, and we hold one
        self.get_state()
    }
}
