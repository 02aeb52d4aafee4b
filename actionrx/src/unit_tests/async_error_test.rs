use crate::OperationFailed;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(error: &OperationFailed) -> u64 {
    let mut hasher = DefaultHasher::new();
    error.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_operation_failed_message() {
    let error = OperationFailed::new("boom");
    assert_eq!(error.message(), "boom");
    assert_eq!(error.to_string(), "boom");
    assert_eq!(error.clone().into_message(), "boom".to_string());
}

#[test]
fn test_operation_failed_from_display() {
    let parse_error = "x".parse::<i32>().unwrap_err();
    let error = OperationFailed::from_display(&parse_error);
    assert_eq!(error.message(), parse_error.to_string());

    assert_eq!(OperationFailed::from("a"), OperationFailed::new("a"));
    assert_eq!(OperationFailed::from("a".to_string()), OperationFailed::new("a"));
}

#[test]
fn test_operation_failed_none() {
    assert_eq!(OperationFailed::none().message(), "Operation returned None!");
}

#[test]
fn test_operation_failed_debug() {
    let error = OperationFailed::new("message");
    assert_eq!(
        format!("{:?}", error),
        r#"OperationFailed { message: "message" }"#
    );
}

#[test]
fn test_operation_failed_hash() {
    assert_eq!(
        hash_of(&OperationFailed::new("same")),
        hash_of(&OperationFailed::new("same"))
    );
    assert_ne!(
        hash_of(&OperationFailed::new("same")),
        hash_of(&OperationFailed::new("other"))
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_operation_failed_serde() {
    let error = OperationFailed::new("message");
    let serialized = serde_json::to_string(&error).unwrap();
    assert_eq!(serialized, r#"{"message":"message"}"#);

    let deserialized: OperationFailed = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, error);
}
