use std::fmt;

use jsonwebtoken::Algorithm;

use crate::auth::ttl::TokenTtl;
use crate::config::ConfigError;

/// Configuration for JWT security settings.
///
/// Built once at startup and handed to [`TokenCodec::new`](crate::auth::jwt::TokenCodec::new).
/// Request-handling code never reads the environment for any of these values.
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime applied when the caller does not pick one
    pub token_ttl: TokenTtl,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret.
    ///
    /// An empty secret is treated the same as a missing one.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::Empty {
                var: crate::config::JWT_SECRET_VAR,
            });
        }

        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
            token_ttl: TokenTtl::DEFAULT,
        })
    }

    pub fn with_token_ttl(mut self, token_ttl: TokenTtl) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.jwt_secret
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        let err = SecurityConfig::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Empty { var: "JWT_SECRET" }));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let security = SecurityConfig::new("super-secret-value").unwrap();
        let rendered = format!("{security:?}");

        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(security.algorithm, Algorithm::HS256);
        assert_eq!(security.token_ttl, TokenTtl::DEFAULT);
    }
}
