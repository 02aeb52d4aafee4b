use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Sink for user-facing failure notifications.
///
/// Called exactly once per failed invocation. Implementations must not block;
/// nothing is read back from them.
pub trait Notifier: Send + Sync + 'static {
    fn notify_failure(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn notify_failure(&self, message: &str) {
        self(message)
    }
}

/// Default notifier: reports failures as `error` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_failure(&self, message: &str) {
        tracing::error!(target: "actionrx::notify", "{message}");
    }
}

/// A failure message as delivered through a [`ChannelNotifier`].
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    pub source: Option<String>,
    pub message: String,
}

/// Forwards notifications to a receiver, e.g. a toast renderer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    source: Option<String>,
    tx: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = unbounded_channel();
        (ChannelNotifier { source: None, tx }, rx)
    }

    /// A sender on the same channel that tags its notifications with `source`.
    pub fn with_source(&self, source: impl Into<String>) -> Self {
        ChannelNotifier {
            source: Some(source.into()),
            tx: self.tx.clone(),
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify_failure(&self, message: &str) {
        // receiver gone means nobody is rendering; drop the message
        let _ = self.tx.send(Notification {
            source: self.source.clone(),
            message: message.to_string(),
        });
    }
}
