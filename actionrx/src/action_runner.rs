use crate::{
    Async, ExecutionResult, Notifier, OperationFailed, StateStore, Status, TracingNotifier,
};
use futures_core::future::BoxFuture;
use futures_signals::signal::{MutableSignalCloned, SignalStream};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type Callback<A, T> = dyn Fn(A) -> BoxFuture<'static, Result<T, OperationFailed>> + Send + Sync;

const ANONYMOUS: &str = "anonymous";

/// Wraps one async callback and exposes its last result, in-flight flag and
/// last error as observable [`Async`] state.
///
/// Overlapping invocations are not fenced: whichever call settles last
/// decides the final state, even if it was started first.
pub struct ActionRunner<A, T: Clone> {
    name: Option<Arc<str>>,
    state: StateStore<Async<T>>,
    callback: Arc<Callback<A, T>>,
    notifier: Arc<dyn Notifier>,
}

impl<A, T: Clone> Clone for ActionRunner<A, T> {
    fn clone(&self) -> Self {
        ActionRunner {
            name: self.name.clone(),
            state: self.state.clone(),
            callback: self.callback.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

fn boxed_callback<A, T, F, Fut, R>(callback: F) -> Arc<Callback<A, T>>
where
    A: 'static,
    T: 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: ExecutionResult<T>,
{
    Arc::new(move |args: A| -> BoxFuture<'static, Result<T, OperationFailed>> {
        let operation = callback(args);
        Box::pin(async move { operation.await.into_outcome() })
    })
}

impl<A, T> ActionRunner<A, T>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// A runner that reports failures through [`TracingNotifier`].
    pub fn new<F, Fut, R>(callback: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: ExecutionResult<T>,
    {
        Self::builder(callback).build()
    }

    pub fn with_notifier<F, Fut, R, N>(callback: F, notifier: N) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: ExecutionResult<T>,
        N: Notifier,
    {
        Self::builder(callback).notifier(notifier).build()
    }

    pub fn builder<F, Fut, R>(callback: F) -> ActionRunnerBuilder<A, T>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: ExecutionResult<T>,
    {
        ActionRunnerBuilder {
            name: None,
            notifier: None,
            initial_data: None,
            callback: boxed_callback(callback),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label(&self) -> &str {
        self.name().unwrap_or(ANONYMOUS)
    }

    /// Starts one call of the wrapped callback.
    ///
    /// The state switches to `Loading` before this returns. The call itself
    /// runs on a spawned task, so this must be called from within a tokio
    /// runtime. The returned [`Invocation`] can be awaited to observe
    /// settlement or dropped; the call runs to completion either way.
    pub fn invoke(&self, args: A) -> Invocation {
        self.state.set_state(Async::start);
        debug!(runner = self.label(), "invocation started");

        let callback = self.callback.clone();
        let state = self.state.clone();
        let notifier = self.notifier.clone();
        let label: Arc<str> = self.name.clone().unwrap_or_else(|| ANONYMOUS.into());

        let handle = tokio::spawn(async move {
            // the callback runs on a nested task, so a panic while building or
            // polling its future surfaces as a join error
            let operation = tokio::spawn(async move { callback(args).await });
            let outcome = match operation.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(OperationFailed::from_display(join_error)),
            };

            match &outcome {
                Ok(_) => debug!(runner = &*label, "invocation succeeded"),
                Err(error) => {
                    warn!(runner = &*label, error = error.message(), "invocation failed");
                    notifier.notify_failure(error.message());
                }
            }
            state.set_state(move |current| current.settle(outcome));
        });

        Invocation { handle }
    }

    /// Overwrites the data without touching status or error.
    pub fn set_data(&self, value: T) {
        self.state.set_state(move |current| current.with_value(value));
        debug!(runner = self.label(), "data replaced");
    }

    pub fn state(&self) -> Async<T> {
        self.state.get_state()
    }

    pub fn data(&self) -> Option<T> {
        self.state.with_state(|state| state.value_ref().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with_state(Async::is_loading)
    }

    pub fn error(&self) -> Option<OperationFailed> {
        self.state.with_state(|state| state.error().cloned())
    }

    pub fn status(&self) -> Status {
        self.state.with_state(Async::status)
    }

    pub fn store(&self) -> &StateStore<Async<T>> {
        &self.state
    }

    pub fn signal(&self) -> MutableSignalCloned<Async<T>> {
        self.state.to_signal()
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<Async<T>>> {
        self.state.to_stream()
    }

    /// Waits until the state is no longer `Loading` and returns it.
    pub async fn settled(&self) -> Async<T> {
        self.state.await_state(|state| !state.is_loading()).await
    }
}

/// Per-runner configuration.
pub struct ActionRunnerBuilder<A, T: Clone> {
    name: Option<Arc<str>>,
    notifier: Option<Arc<dyn Notifier>>,
    initial_data: Option<T>,
    callback: Arc<Callback<A, T>>,
}

impl<A, T> ActionRunnerBuilder<A, T>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Label used in log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        self.name = Some(Arc::from(name));
        self
    }

    pub fn notifier<N: Notifier>(mut self, notifier: N) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn shared_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Seeds the data of the idle state.
    pub fn initial_data(mut self, value: T) -> Self {
        self.initial_data = Some(value);
        self
    }

    pub fn build(self) -> ActionRunner<A, T> {
        ActionRunner {
            name: self.name,
            state: StateStore::new(Async::Idle(self.initial_data)),
            callback: self.callback,
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
        }
    }
}

/// Handle on one in-flight call. Resolves once its outcome is in the state.
#[pin_project]
#[derive(Debug)]
pub struct Invocation {
    #[pin]
    handle: JoinHandle<()>,
}

impl Invocation {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Invocation {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // failures are already recorded in the runner state
        self.project().handle.poll(cx).map(|_| ())
    }
}
