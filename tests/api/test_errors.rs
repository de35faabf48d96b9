// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the API error taxonomy

use mediaforge_node::api::ApiError;

#[test]
fn test_status_codes() {
    assert_eq!(ApiError::InvalidRequest("x".into()).status_code(), 400);
    assert_eq!(
        ApiError::ValidationError {
            field: "steps".into(),
            message: "bad".into()
        }
        .status_code(),
        400
    );
    assert_eq!(
        ApiError::RateLimitExceeded { retry_after: 60 }.status_code(),
        429
    );
    assert_eq!(ApiError::ServiceUnavailable("x".into()).status_code(), 503);
    assert_eq!(ApiError::ResourceExhausted("oom".into()).status_code(), 500);
    assert_eq!(ApiError::StorageFailure("s3".into()).status_code(), 500);
    assert_eq!(ApiError::InternalError("x".into()).status_code(), 500);
}

#[test]
fn test_error_response_shape() {
    let response = ApiError::ResourceExhausted("out of memory after retries".into())
        .to_response(Some("req-1".to_string()));
    assert_eq!(response.error_type, "resource_exhausted");
    assert!(response.message.contains("out of memory"));
    assert_eq!(response.request_id.as_deref(), Some("req-1"));
}

#[test]
fn test_validation_error_carries_field_detail() {
    let response = ApiError::ValidationError {
        field: "scale".into(),
        message: "must be 2 or 4".into(),
    }
    .to_response(None);
    let details = response.details.unwrap();
    assert_eq!(details["field"], serde_json::json!("scale"));
}

#[test]
fn test_rate_limit_carries_retry_after() {
    let response = ApiError::RateLimitExceeded { retry_after: 60 }.to_response(None);
    let details = response.details.unwrap();
    assert_eq!(details["retry_after"], serde_json::json!(60));
}
