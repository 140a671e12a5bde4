//! Error codes for the gateway's HTTP error contract.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Each code
//! maps 1:1 to the string that appears in the `error` field of a response.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing or invalid bearer token
    Unauthorized,
    /// No route matches the request path
    NotFound,
    /// Route exists but not for this method
    MethodNotAllowed,
    /// Anything without a more specific declared code
    InternalServerError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
