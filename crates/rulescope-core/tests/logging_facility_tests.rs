#![allow(clippy::unwrap_used, clippy::expect_used)]

use rulescope_core::errors::RulesError;
use rulescope_core::logging_facility::init::{init, Profile};
use rulescope_core::logging_facility::test_capture::init_test_capture;
use rulescope_core::{log_op_end, log_op_error, log_op_skip, log_op_start};
use rulescope_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_SKIP, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, engine = "E1");

    let start_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_START))
        .collect();

    assert_eq!(start_events.len(), 1);
    assert_eq!(start_events[0].field("engine"), Some("E1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RulesError::UnknownEngine {
        engine: "E9".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].err_code(), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].err_kind(), Some("NotFound"));
    assert_eq!(error_events[0].duration_ms(), Some(10));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_log_op_skip_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_skip_unique_4";

    log_op_skip!(op_name, reason = "empty group");

    capture.assert_event_exists(op_name, EVENT_SKIP);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field("reason"), Some("empty group"));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_5";

    log_op_start!(op_name, group = "G1");
    log_op_end!(op_name, duration_ms = 7);

    let events = capture.events_for_op(op_name);
    let kinds: Vec<&str> = events.iter().filter_map(|e| e.event()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);
}

#[test]
fn test_init_after_capture_does_not_panic() {
    let _capture = init_test_capture();
    init(Profile::Test);
    init(Profile::Development);
}
