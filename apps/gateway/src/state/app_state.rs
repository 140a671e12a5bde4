use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenCodec;

/// Application state shared by every worker.
///
/// Holds only read-only values built at startup, so no locking is involved.
#[derive(Clone)]
pub struct AppState {
    /// Token codec keyed with the process-wide signing secret
    pub tokens: TokenCodec,
}

impl AppState {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            tokens: TokenCodec::new(security),
        }
    }
}
