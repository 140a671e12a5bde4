#![allow(dead_code, unused_imports)]

// tests/common/mod.rs
use actix_web::http::header::{HeaderName, AUTHORIZATION};
use gateway::test_support::TEST_SECRET;
use gateway::{Claims, SecurityConfig, TokenCodec};
use serde_json::Value;

pub use gateway_test_support::{assert_error_body, read_json};

// Logging is auto-installed for every test binary that pulls in this module
#[ctor::ctor]
fn init_logging() {
    gateway_test_support::logging::init();
}

/// Codec keyed with the same secret as `test_state()`.
pub fn test_codec() -> TokenCodec {
    codec_with_secret(TEST_SECRET)
}

pub fn codec_with_secret(secret: &str) -> TokenCodec {
    TokenCodec::new(&SecurityConfig::new(secret).expect("non-empty secret"))
}

/// Build a claims map from a `json!` object literal.
pub fn claims(value: Value) -> Claims {
    value
        .as_object()
        .cloned()
        .expect("claims must be a JSON object")
}

pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}
