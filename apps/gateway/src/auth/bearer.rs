use crate::auth::error::AuthError;

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Pull the raw token out of an `Authorization` header value.
///
/// The header bytes must start with exactly `"Bearer "`; everything after the
/// prefix is the token, untouched. No trimming, case folding or other schemes.
/// A token that is not UTF-8 can never verify, so it is `InvalidToken`.
pub fn extract_bearer(header: Option<&[u8]>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingCredential)?;

    std::str::from_utf8(token).map_err(|_| AuthError::InvalidToken)
}
