use crate::OperationFailed;

/// Observable state of one async action.
///
/// `Loading` and `Fail` keep whatever data was present before, so a failing or
/// in-flight call never blanks out a previously fetched value.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Async<T: Clone> {
    Idle(Option<T>),
    Loading(Option<T>),
    Success { value: T },
    Fail { error: OperationFailed, value: Option<T> },
}

/// Lifecycle position of an [`Async`], without its payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl<T: Clone> Async<T> {
    pub fn status(&self) -> Status {
        match self {
            Async::Idle(_) => Status::Idle,
            Async::Loading(_) => Status::Running,
            Async::Success { .. } => Status::Succeeded,
            Async::Fail { .. } => Status::Failed,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Async::Idle(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Async::Loading(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Async::Success { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Async::Fail { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Async::Success { .. } | Async::Fail { .. })
    }

    pub fn value_ref(&self) -> Option<&T> {
        match self {
            Async::Idle(value) | Async::Loading(value) => value.as_ref(),
            Async::Success { value } => Some(value),
            Async::Fail { value, .. } => value.as_ref(),
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Async::Idle(value) | Async::Loading(value) => value,
            Async::Success { value } => Some(value),
            Async::Fail { value, .. } => value,
        }
    }

    pub fn error(&self) -> Option<&OperationFailed> {
        match self {
            Async::Fail { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn idle() -> Self {
        Async::Idle(None)
    }

    pub fn loading(value: Option<T>) -> Self {
        Async::Loading(value)
    }

    pub fn success(value: T) -> Self {
        Async::Success { value }
    }

    pub fn fail(error: OperationFailed, value: Option<T>) -> Self {
        Async::Fail { error, value }
    }

    pub fn fail_with_message(message: impl Into<String>, value: Option<T>) -> Self {
        Async::Fail {
            error: OperationFailed::new(message),
            value,
        }
    }

    /// Enters `Loading`, clearing any error and keeping the current data.
    pub fn start(self) -> Self {
        Async::Loading(self.value())
    }

    /// Records the outcome of a settled call on top of the current state.
    ///
    /// A failure keeps the data present at the moment of settlement, which
    /// may have been written by a call that settled in between.
    pub fn settle(self, outcome: Result<T, OperationFailed>) -> Self {
        match outcome {
            Ok(value) => Async::Success { value },
            Err(error) => Async::Fail {
                error,
                value: self.value(),
            },
        }
    }

    /// Replaces the data while keeping status and error as they are.
    pub fn with_value(self, value: T) -> Self {
        match self {
            Async::Idle(_) => Async::Idle(Some(value)),
            Async::Loading(_) => Async::Loading(Some(value)),
            Async::Success { .. } => Async::Success { value },
            Async::Fail { error, .. } => Async::Fail {
                error,
                value: Some(value),
            },
        }
    }
}

impl<T: Clone> Default for Async<T> {
    fn default() -> Self {
        Async::Idle(None)
    }
}

impl<T: Clone> From<&Async<T>> for Option<T> {
    fn from(value: &Async<T>) -> Self {
        value.value_ref().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle() {
        let idle: Async<i32> = Async::default();
        assert_eq!(idle, Async::idle());
        assert_eq!(idle.status(), Status::Idle);
        assert!(idle.is_idle());
        assert!(!idle.is_loading());
        assert!(!idle.is_complete());
        assert!(idle.error().is_none());
        assert!(idle.value_ref().is_none());
        assert!(idle.value().is_none());
    }

    #[test]
    fn test_loading() {
        let loading = Async::loading(Some(7));
        assert_eq!(loading.status(), Status::Running);
        assert!(loading.is_loading());
        assert!(!loading.is_complete());
        assert!(loading.error().is_none());
        assert_eq!(loading.value_ref(), Some(&7));
        assert_eq!(loading.value(), Some(7));

        let loading = Async::loading(None::<i32>);
        assert_eq!(loading.value_ref(), None);
    }

    #[test]
    fn test_success() {
        let success = Async::success(8);
        assert_eq!(success.status(), Status::Succeeded);
        assert!(success.is_success());
        assert!(success.is_complete());
        assert!(success.error().is_none());
        assert_eq!(success.value_ref(), Some(&8));
        assert_eq!(success.value(), Some(8));
    }

    #[test]
    fn test_fail() {
        let fail = Async::fail_with_message("Connection failed", Some(50));
        assert_eq!(fail.status(), Status::Failed);
        assert!(fail.is_fail());
        assert!(fail.is_complete());
        assert_eq!(fail.error().map(|e| e.message()), Some("Connection failed"));
        assert_eq!(fail.value_ref(), Some(&50));

        let fail = Async::fail(OperationFailed::none(), None::<i32>);
        assert_eq!(fail.value(), None);
    }

    #[test]
    fn test_start_clears_error_and_keeps_value() {
        let fail = Async::fail_with_message("stale", Some(3));
        assert_eq!(fail.start(), Async::Loading(Some(3)));

        let success = Async::success(4);
        assert_eq!(success.start(), Async::Loading(Some(4)));

        assert_eq!(Async::<i32>::idle().start(), Async::Loading(None));
    }

    #[test]
    fn test_settle() {
        let running = Async::loading(Some(1));
        assert_eq!(running.clone().settle(Ok(2)), Async::success(2));
        assert_eq!(
            running.settle(Err(OperationFailed::new("boom"))),
            Async::fail_with_message("boom", Some(1))
        );

        // a failure landing on a success keeps that success's value
        let success = Async::success(9);
        assert_eq!(
            success.settle(Err("late".into())),
            Async::fail_with_message("late", Some(9))
        );
    }

    #[test]
    fn test_with_value_keeps_status() {
        assert_eq!(Async::idle().with_value(1), Async::Idle(Some(1)));
        assert_eq!(Async::loading(None).with_value(1), Async::Loading(Some(1)));
        assert_eq!(Async::success(0).with_value(1), Async::success(1));
        assert_eq!(
            Async::fail_with_message("x", None).with_value(1),
            Async::fail_with_message("x", Some(1))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_async_serde() {
        let state = Async::fail_with_message("x", Some(1));
        let serialized = serde_json::to_string(&state).unwrap();
        assert_eq!(serialized, r#"{"Fail":{"error":{"message":"x"},"value":1}}"#);

        let deserialized: Async<i32> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, state);
    }

    #[test]
    fn test_option_from_ref() {
        let state = Async::fail_with_message("x", Some("kept".to_string()));
        let value: Option<String> = Option::from(&state);
        assert_eq!(value.as_deref(), Some("kept"));
    }
}
