//! Stateless bearer-token authentication.
//!
//! Leaf-first: [`jwt`] signs and verifies tokens, [`bearer`] pulls the raw
//! token out of the `Authorization` header, and [`guard`] combines both in
//! front of every protected route.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod ttl;

pub use bearer::extract_bearer;
pub use claims::{Claims, Identity};
pub use error::AuthError;
pub use guard::{authenticate, AuthGuard};
pub use jwt::TokenCodec;
pub use ttl::TokenTtl;
