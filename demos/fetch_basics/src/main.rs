use crate::tracing_setup::tracing_init;
use actionrx::{ActionRunner, Async, ChannelNotifier, OperationFailed};
use futures_signals::signal::SignalExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
mod tracing_setup;

#[derive(Debug)]
enum Request {
    Double(i64),
    Boom,
}

async fn compute(request: Request) -> Result<i64, OperationFailed> {
    sleep(Duration::from_millis(50)).await;
    match request {
        Request::Double(x) => Ok(x * 2),
        Request::Boom => Err(OperationFailed::new("boom")),
    }
}

#[tokio::main]
async fn main() {
    tracing_init();

    let (notifier, mut toasts) = ChannelNotifier::channel();
    let toaster = tokio::spawn(async move {
        while let Some(toast) = toasts.recv().await {
            warn!("  Toast | {}", toast.message);
        }
    });

    info!("==========================================");
    warn!("A. Successful invocation");

    let runner: ActionRunner<Request, i64> = ActionRunner::builder(compute)
        .name("compute")
        .notifier(notifier.clone())
        .build();

    runner.invoke(Request::Double(21));
    runner
        .signal()
        .stop_if(|state| state.is_complete())
        .for_each(|state| async move {
            info!("  Main | show state: {:?}", state);
        })
        .await;

    info!("==========================================");
    warn!("B. Failure keeps the previous data");

    runner.invoke(Request::Boom).await;
    info!("  Main | status: {:?}, data: {:?}", runner.status(), runner.data());
    if let Some(error) = runner.error() {
        info!("  Main | error: {}", error);
    }

    info!("==========================================");
    warn!("C. set_data overwrites data only");

    runner.set_data(7);
    info!("  Main | show state: {:?}", runner.state());

    info!("==========================================");
    warn!("D. Last settled call wins");

    let slow: ActionRunner<(u64, &'static str), String> =
        ActionRunner::builder(|(delay, label): (u64, &'static str)| async move {
            sleep(Duration::from_millis(delay)).await;
            label.to_string()
        })
        .name("race")
        .notifier(notifier)
        .build();

    let a = slow.invoke((100, "A"));
    let b = slow.invoke((10, "B"));
    b.await;
    info!("  Main | after B: {:?}", slow.state());
    a.await;
    info!("  Main | after A: {:?}", slow.state());
    if slow.state() == Async::success("A".to_string()) {
        warn!("  Main | A started first but settled last, so A wins");
    }

    drop(runner);
    drop(slow);
    // the toaster ends once every notifier handle is gone
    let _ = toaster.await;

    info!("==========================================");
    info!("  Main | Finish");
}
