use crate::OperationFailed;
use std::fmt::Display;

/// Output types a wrapped callback may resolve to.
///
/// A bare value always succeeds, a `Result` fails with the `Display` text of
/// its error and an `Option` fails when it is `None`.
pub trait ExecutionResult<T> {
    fn into_outcome(self) -> Result<T, OperationFailed>;
}

impl<T> ExecutionResult<T> for T {
    fn into_outcome(self) -> Result<T, OperationFailed> {
        Ok(self)
    }
}

impl<T, E> ExecutionResult<T> for Result<T, E>
where
    E: Display,
{
    fn into_outcome(self) -> Result<T, OperationFailed> {
        self.map_err(OperationFailed::from_display)
    }
}

impl<T> ExecutionResult<T> for Option<T> {
    fn into_outcome(self) -> Result<T, OperationFailed> {
        self.ok_or_else(OperationFailed::none)
    }
}
