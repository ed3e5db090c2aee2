use super::*;

#[test]
fn error_message_from_body_prefers_error_key() {
    let body = r#"{"error":"Employee not found","message":"ignored"}"#;
    assert_eq!(error_message_from_body(body).as_deref(), Some("Employee not found"));
}

#[test]
fn error_message_from_body_falls_back_to_message_and_detail() {
    assert_eq!(error_message_from_body(r#"{"message":"bad dates"}"#).as_deref(), Some("bad dates"));
    assert_eq!(error_message_from_body(r#"{"detail":"nope"}"#).as_deref(), Some("nope"));
}

#[test]
fn error_message_from_body_ignores_blank_and_non_json() {
    assert_eq!(error_message_from_body(r#"{"error":"   "}"#), None);
    assert_eq!(error_message_from_body("<html>502</html>"), None);
    assert_eq!(error_message_from_body(r#"{"error":42}"#), None);
}

#[test]
fn network_errors_show_generic_message() {
    let err = ApiError::Network("TypeError: Failed to fetch".to_owned());
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
}

#[test]
fn structured_server_errors_are_shown_verbatim() {
    let err = ApiError::from_response(400, r#"{"error":"project_id is required for project-level reports"}"#);
    assert_eq!(err.user_message(), "project_id is required for project-level reports");
}

#[test]
fn unstructured_server_errors_show_status() {
    let err = ApiError::from_response(502, "Bad Gateway");
    assert_eq!(err.user_message(), "Request failed (status 502)");
    assert_eq!(err.to_string(), "request failed with status 502: no details");
}
