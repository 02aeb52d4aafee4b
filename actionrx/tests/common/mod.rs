use actionrx::mock::{RecordingNotifier, ScriptedCallback};
use actionrx::ActionRunner;

pub struct Harness<T: Clone> {
    pub runner: ActionRunner<(), T>,
    pub script: ScriptedCallback<T>,
    pub notifier: RecordingNotifier,
}

pub fn scripted<T>() -> Harness<T>
where
    T: Clone + Send + Sync + 'static,
{
    let script = ScriptedCallback::new();
    let notifier = RecordingNotifier::new();
    let runner = ActionRunner::builder(script.callback::<()>())
        .name("scripted")
        .notifier(notifier.clone())
        .build();
    Harness {
        runner,
        script,
        notifier,
    }
}
