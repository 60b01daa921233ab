use api_contract::{ApiResponse, PageResult};

#[test]
fn api_response_success() {
    let response = ApiResponse::success("ok");
    assert!(response.success);
    assert!(response.data.is_some());
    assert!(response.error.is_none());
}

#[test]
fn api_response_error() {
    let response = ApiResponse::<()>::error("INVALID.REQUEST", "name required");
    assert!(!response.success);
    assert!(response.data.is_none());
    let error = response.error.expect("error");
    assert_eq!(error.code, "INVALID.REQUEST");
    assert_eq!(error.message, "name required");
}

#[test]
fn api_response_round_trips_as_json() {
    let body = serde_json::to_string(&ApiResponse::success(PageResult {
        list: vec!["a".to_string(), "b".to_string()],
        total: 2,
    }))
    .expect("serialize");
    let parsed: ApiResponse<PageResult<String>> = serde_json::from_str(&body).expect("parse");
    assert!(parsed.success);
    let data = parsed.data.expect("data");
    assert_eq!(data.total, 2);
    assert_eq!(data.list, vec!["a".to_string(), "b".to_string()]);
}
