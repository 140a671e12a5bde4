use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::Identity;
use crate::auth::error::AuthError;
use crate::error::AppError;

/// Hands the identity attached by [`AuthGuard`](crate::auth::guard::AuthGuard)
/// to a handler.
///
/// Public routes carry no identity; take `Option<Identity>` there. Requiring
/// `Identity` on a public route rejects the request as unauthenticated.
impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(AppError::Auth(AuthError::MissingCredential)),
        )
    }
}
