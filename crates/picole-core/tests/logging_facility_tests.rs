#![allow(clippy::unwrap_used, clippy::expect_used)]

use picole_core::errors::PicoleError;
use picole_core::logging_facility::test_capture::init_test_capture;
use picole_core::{log_op_end, log_op_error, log_op_start};
use picole_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_TABLE};

#[test]
fn test_log_op_start_records_table() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, table = "sabor");

    let events = capture.events_for(op_name);
    let start = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START))
        .expect("start event captured");
    assert_eq!(start.field(FIELD_TABLE), Some("sabor"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = PicoleError::Duplicate {
        entity: "AditivoNutritivo",
        field: "nome",
        value: "VITAMINA D".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err_code"), Some("ERR_DUPLICATE"));
    assert_eq!(error_events[0].field("err_kind"), Some("Duplicate"));
}

#[test]
fn test_start_and_end_pair_per_operation() {
    let capture = init_test_capture();
    let op_name = "test_start_end_pair_unique_4";

    log_op_start!(op_name, record_id = 7_i64);
    log_op_end!(op_name, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)),
        2
    );
}
