//! Claims payload and the identity attached to authenticated requests.

use serde_json::{Map, Value};

/// Open mapping of claim names to JSON values, as supplied by the caller of
/// [`TokenCodec::sign`](crate::auth::jwt::TokenCodec::sign).
pub type Claims = Map<String, Value>;

/// Claim carrying the user identifier that downstream handlers rely on.
pub const USER_ID_CLAIM: &str = "userId";

/// Identity attached to a request after a successful guard pass.
///
/// Lives in the request extensions for the duration of one request only.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    claims: Claims,
}

impl Identity {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    /// The `userId` claim, when present and a string.
    pub fn user_id(&self) -> Option<&str> {
        self.claims.get(USER_ID_CLAIM).and_then(Value::as_str)
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }
}
