use fwd_telemetry::{new_request_ids, record_api_failure, record_api_request};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
}

#[test]
fn counters_accumulate() {
    let before = fwd_telemetry::metrics().snapshot();
    record_api_request();
    record_api_failure();
    let after = fwd_telemetry::metrics().snapshot();
    assert!(after.api_requests >= before.api_requests + 1);
    assert!(after.api_failures >= before.api_failures + 1);
}
