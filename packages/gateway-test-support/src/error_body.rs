//! Error contract test helpers
//!
//! Assertions for the stable error body without depending on gateway types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Local mirror of the gateway's error body.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ErrorBodyLike {
    error: String,
    message: String,
}

/// Read a response body as JSON.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = actix_web::test::read_body(resp).await;
    serde_json::from_slice(&body).expect("Response body should be valid JSON")
}

/// Assert that a response carries exactly `{ "error": code, "message": message }`
/// with the expected status and a JSON content type.
pub async fn assert_error_body<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: &str,
) {
    assert_eq!(resp.status(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let body = actix_web::test::read_body(resp).await;
    let parsed: ErrorBodyLike = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Response body should match the error contract: {e}; body={}",
            String::from_utf8_lossy(&body)
        )
    });

    assert_eq!(
        parsed,
        ErrorBodyLike {
            error: expected_code.to_string(),
            message: expected_message.to_string(),
        }
    );
}
