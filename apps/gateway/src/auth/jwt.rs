use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use tracing::debug;

use crate::auth::claims::Claims;
use crate::auth::error::AuthError;
use crate::auth::ttl::TokenTtl;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Registered claims written by the codec itself.
pub const RESERVED_CLAIMS: [&str; 2] = ["exp", "iat"];

/// Signs claims into bearer tokens and verifies them back.
///
/// Keys are derived once from the [`SecurityConfig`]; the codec holds no other
/// state and is safe to share across workers.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
    default_ttl: TokenTtl,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        // Default Validation checks exp; pin algorithm and drop the clock-skew leeway.
        let mut validation = Validation::new(security.algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(security.secret()),
            decoding: DecodingKey::from_secret(security.secret()),
            header: Header::new(security.algorithm),
            validation,
            default_ttl: security.token_ttl,
        }
    }

    pub fn default_ttl(&self) -> TokenTtl {
        self.default_ttl
    }

    /// Sign `claims` with the configured default lifetime.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        self.sign_with_ttl(claims, self.default_ttl)
    }

    pub fn sign_with_ttl(&self, claims: &Claims, ttl: TokenTtl) -> Result<String, AppError> {
        self.sign_at(claims, ttl, SystemTime::now())
    }

    /// Sign `claims` as if issued at `now`.
    ///
    /// Errors:
    /// - `claims` already carries `exp` or `iat` → internal error
    /// - `now` before the Unix epoch, or encoding failure → internal error
    pub fn sign_at(
        &self,
        claims: &Claims,
        ttl: TokenTtl,
        now: SystemTime,
    ) -> Result<String, AppError> {
        if let Some(key) = RESERVED_CLAIMS.iter().find(|key| claims.contains_key(**key)) {
            return Err(AppError::internal(format!(
                "claims must not carry reserved claim '{key}'"
            )));
        }

        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal_with("Failed to get current time", e))?
            .as_secs();
        let exp = iat.saturating_add(ttl.as_secs());

        let mut payload = claims.clone();
        payload.insert("iat".to_string(), Value::from(iat));
        payload.insert("exp".to_string(), Value::from(exp));

        encode(&self.header, &payload, &self.encoding)
            .map_err(|e| AppError::internal_with("Failed to encode JWT", e))
    }

    /// Verify a token and return the claims it was signed with.
    ///
    /// Malformed structure, signature mismatch and expiry all collapse into
    /// [`AuthError::InvalidToken`]; the precise cause only reaches the debug log.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(reason = ?e.kind(), "token rejected");
            AuthError::InvalidToken
        })?;

        let mut claims = data.claims;
        for key in RESERVED_CLAIMS {
            claims.remove(key);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use serde_json::json;

    use super::*;

    const SECRET: &str = "test_secret_key_for_testing_purposes_only";

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&SecurityConfig::new(secret).unwrap())
    }

    fn claims(value: Value) -> Claims {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let codec = codec(SECRET);
        let original = claims(json!({ "userId": "u1", "roles": ["admin"], "n": 3 }));

        let token = codec.sign(&original).unwrap();
        let verified = codec.verify(&token).unwrap();

        assert_eq!(verified, original);
    }

    #[test]
    fn test_default_ttl_is_seven_days() {
        let codec = codec(SECRET);
        let now = SystemTime::now();
        let token = codec.sign_at(&Claims::new(), codec.default_ttl(), now).unwrap();

        let raw = decode::<Claims>(&token, &codec.decoding, &codec.validation)
            .unwrap()
            .claims;
        let iat = now.duration_since(UNIX_EPOCH).unwrap().as_secs();

        assert_eq!(raw["iat"], json!(iat));
        assert_eq!(raw["exp"], json!(iat + 7 * 24 * 60 * 60));
    }

    #[test]
    fn test_expired_token() {
        let codec = codec(SECRET);
        let ttl = TokenTtl::from_secs(15 * 60).unwrap();
        // 20 minutes ago so 15-minute token is expired
        let now = SystemTime::now() - Duration::from_secs(20 * 60);

        let token = codec
            .sign_at(&claims(json!({ "userId": "u1" })), ttl, now)
            .unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let codec = codec(SECRET);
        let ttl = TokenTtl::from_secs(15 * 60).unwrap();
        let now = SystemTime::now() - Duration::from_secs(10 * 60);

        let token = codec
            .sign_at(&claims(json!({ "userId": "u1" })), ttl, now)
            .unwrap();

        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn test_bad_signature() {
        let token = codec("secret-A")
            .sign(&claims(json!({ "userId": "u1" })))
            .unwrap();

        assert_eq!(codec("secret-B").verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = codec(SECRET);

        for token in ["", "garbage", "a.b.c", "invalid.jwt.token"] {
            assert_eq!(codec.verify(token), Err(AuthError::InvalidToken), "{token:?}");
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = codec(SECRET);
        let token = codec.sign(&claims(json!({ "userId": "u1" }))).unwrap();

        let forged = codec.sign(&claims(json!({ "userId": "admin" }))).unwrap();

        let header = token.split('.').next().unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let signature = token.split('.').nth(2).unwrap();
        let spliced = format!("{header}.{forged_payload}.{signature}");

        assert_eq!(codec.verify(&spliced), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_reserved_claims_are_refused() {
        let codec = codec(SECRET);

        for key in RESERVED_CLAIMS {
            let mut payload = claims(json!({ "userId": "u1" }));
            payload.insert(key.to_string(), json!(1));

            assert!(matches!(
                codec.sign(&payload),
                Err(AppError::Internal { .. })
            ));
        }
    }
}
