use tickles_core::{BtStatus, TickError};

#[test]
fn status_display_names() {
    assert_eq!(BtStatus::Running.to_string(), "Running");
    assert_eq!(BtStatus::Succeeded.to_string(), "Succeeded");
    assert_eq!(BtStatus::Failed.to_string(), "Failed");
}

#[test]
fn status_from_bool_and_outcome() {
    assert_eq!(BtStatus::from(true), BtStatus::Succeeded);
    assert_eq!(BtStatus::from(false), BtStatus::Failed);
    assert_eq!(BtStatus::Running.outcome(), None);
    assert_eq!(BtStatus::Succeeded.outcome(), Some(true));
    assert_eq!(BtStatus::Failed.outcome(), Some(false));
}

#[test]
fn not_converged_message() {
    let err = TickError::NotConverged { tick: 3, passes: 64 };
    assert_eq!(err.to_string(), "tick 3 did not converge after 64 passes");
}

#[cfg(feature = "serde")]
#[test]
fn status_json_roundtrip() {
    let json = serde_json::to_string(&BtStatus::Running).expect("serialize");
    assert_eq!(json, "\"Running\"");
    let back: BtStatus = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, BtStatus::Running);
}
