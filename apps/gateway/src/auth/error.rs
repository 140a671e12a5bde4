use thiserror::Error;

/// Request-level authentication failures.
///
/// The `Display` text is the client-facing message; it is part of the HTTP
/// error contract and must stay stable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or one that does not use the `Bearer ` scheme.
    #[error("Missing bearer token")]
    MissingCredential,
    /// Malformed token, signature mismatch, or expired token. The three are
    /// deliberately indistinguishable.
    #[error("Invalid token")]
    InvalidToken,
}
