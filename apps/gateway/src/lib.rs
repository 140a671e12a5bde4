#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod test_support;

// Re-exports for public API
pub use auth::bearer::extract_bearer;
pub use auth::claims::{Claims, Identity, USER_ID_CLAIM};
pub use auth::error::AuthError;
pub use auth::guard::{authenticate, AuthGuard};
pub use auth::jwt::TokenCodec;
pub use auth::ttl::TokenTtl;
pub use config::{AppConfig, ConfigError};
pub use error::{AppError, ErrorBody};
pub use errors::ErrorCode;
pub use middleware::normalize_errors::NormalizeErrors;
pub use middleware::request_trace::{RequestId, RequestTrace};
pub use middleware::structured_logger::StructuredLogger;
pub use routes::{RouteTable, RouteVisibility};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    gateway_test_support::logging::init();
}
