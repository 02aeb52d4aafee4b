use crate::mock::RecordingNotifier;
use crate::{ActionRunner, OperationFailed};

mod async_error_test;
mod stream_ext_test;

/// Doubles its input; fails for negative input.
pub fn doubling_runner(notifier: RecordingNotifier) -> ActionRunner<i32, i32> {
    ActionRunner::builder(|x: i32| async move {
        if x < 0 {
            Err(OperationFailed::new(format!("negative input: {x}")))
        } else {
            Ok(x * 2)
        }
    })
    .name("doubler")
    .notifier(notifier)
    .build()
}
