//! Test doubles for runners: a notifier that records what it is told and a
//! callback that replays a script of delayed responses.

use crate::Notifier;
use futures_core::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Notifier that keeps every message it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        lock(&self.messages).len()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }

    pub fn last(&self) -> Option<String> {
        lock(&self.messages).last().cloned()
    }

    pub fn clear(&self) {
        lock(&self.messages).clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify_failure(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

#[derive(Debug)]
struct Scripted<T> {
    delay: Duration,
    outcome: Result<T, String>,
}

/// Callback whose responses are queued up front.
///
/// Each call pops the next response, sleeps for its delay and then resolves
/// with it. A call with nothing queued fails with [`ScriptedCallback::EXHAUSTED`].
#[derive(Debug)]
pub struct ScriptedCallback<T> {
    script: Arc<Mutex<VecDeque<Scripted<T>>>>,
    calls: Arc<Mutex<usize>>,
}

impl<T> Clone for ScriptedCallback<T> {
    fn clone(&self) -> Self {
        ScriptedCallback {
            script: self.script.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T> Default for ScriptedCallback<T> {
    fn default() -> Self {
        ScriptedCallback {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl<T: Send + 'static> ScriptedCallback<T> {
    pub const EXHAUSTED: &'static str = "no scripted response left";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_ok(&self, value: T, delay: Duration) -> &Self {
        lock(&self.script).push_back(Scripted {
            delay,
            outcome: Ok(value),
        });
        self
    }

    pub fn respond_err(&self, message: impl Into<String>, delay: Duration) -> &Self {
        lock(&self.script).push_back(Scripted {
            delay,
            outcome: Err(message.into()),
        });
        self
    }

    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }

    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }

    /// A callback for a runner; its arguments are ignored.
    pub fn callback<A>(
        &self,
    ) -> impl Fn(A) -> BoxFuture<'static, Result<T, String>> + Send + Sync + 'static
    where
        A: 'static,
    {
        let script = self.script.clone();
        let calls = self.calls.clone();
        move |_args: A| -> BoxFuture<'static, Result<T, String>> {
            *lock(&calls) += 1;
            let next = lock(&script).pop_front();
            Box::pin(async move {
                match next {
                    Some(Scripted { delay, outcome }) => {
                        tokio::time::sleep(delay).await;
                        outcome
                    }
                    None => Err(Self::EXHAUSTED.to_string()),
                }
            })
        }
    }
}
