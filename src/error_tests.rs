use super::*;

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_invalid_settings_display() {
    let err = Error::InvalidSettings("cascade_count must be at least 1".to_string());
    assert_eq!(
        err.to_string(),
        "Invalid settings: cascade_count must be at least 1"
    );
}

#[test]
fn test_capacity_exceeded_display() {
    let err = Error::CapacityExceeded { capacity: 256 };
    assert_eq!(
        err.to_string(),
        "Capacity exceeded: container holds at most 256 entries"
    );
}

// ============================================================================
// Trait plumbing
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(Error::CapacityExceeded { capacity: 4 });
    assert!(err.source().is_none());
}

#[test]
fn test_error_is_cloneable_and_comparable() {
    let a = Error::InvalidSettings("x".to_string());
    let b = a.clone();
    assert_eq!(a, b);
}
