use std::fmt::Display;
use thiserror::Error;

/// The failure recorded when a wrapped callback does not produce a value.
///
/// There is a single error kind at the runner boundary: whatever the callback
/// failed with is reduced to its human-readable message. The same text is what
/// the notifier receives.
#[derive(Error, Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct OperationFailed {
    message: String,
}

impl OperationFailed {
    /// Message used when a callback resolves to `None`.
    pub const NONE_MESSAGE: &'static str = "Operation returned None!";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Captures the `Display` text of any error value.
    pub fn from_display(error: impl Display) -> Self {
        Self::new(error.to_string())
    }

    pub fn none() -> Self {
        Self::new(Self::NONE_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<String> for OperationFailed {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for OperationFailed {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
