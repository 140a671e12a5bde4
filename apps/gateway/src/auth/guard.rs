//! Auth guard: the single enforcement point in front of protected handlers.
//!
//! Each resource registered through [`RouteTable`](crate::routes::RouteTable)
//! is wrapped in an [`AuthGuard`] carrying that resource's method → visibility
//! map. Public entries skip all credential work; everything else must present
//! a valid bearer token before the handler runs.

use std::collections::HashMap;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::bearer::extract_bearer;
use crate::auth::claims::Identity;
use crate::auth::error::AuthError;
use crate::auth::jwt::TokenCodec;
use crate::error::AppError;
use crate::routes::RouteVisibility;
use crate::state::app_state::AppState;

/// Decide whether a request may proceed.
///
/// - `Public` → `Ok(None)` without looking at the header.
/// - `Protected` → extract the bearer token, verify it, `Ok(Some(identity))`.
pub fn authenticate(
    visibility: RouteVisibility,
    authorization: Option<&[u8]>,
    codec: &TokenCodec,
) -> Result<Option<Identity>, AuthError> {
    if visibility.is_public() {
        return Ok(None);
    }

    let token = extract_bearer(authorization)?;
    let claims = codec.verify(token)?;
    Ok(Some(Identity::new(claims)))
}

/// Resource-level middleware enforcing [`authenticate`].
#[derive(Clone, Default)]
pub struct AuthGuard {
    visibility: Rc<HashMap<Method, RouteVisibility>>,
}

impl AuthGuard {
    pub fn new(visibility: HashMap<Method, RouteVisibility>) -> Self {
        Self {
            visibility: Rc::new(visibility),
        }
    }

    /// Unknown methods are protected.
    pub fn visibility_for(&self, method: &Method) -> RouteVisibility {
        self.visibility.get(method).copied().unwrap_or_default()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service,
            guard: self.clone(),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: S,
    guard: AuthGuard,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let visibility = self.guard.visibility_for(req.method());

        // Public routes never touch the header, so a malformed one cannot fail them.
        if visibility.is_public() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) });
        }

        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            let err = AppError::internal("AppState not registered on the application");
            return Box::pin(ready(Ok(req.error_response(err).map_into_right_body())));
        };

        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.as_bytes());

        match authenticate(visibility, authorization, &app_state.tokens) {
            Ok(identity) => {
                if let Some(identity) = identity {
                    req.extensions_mut().insert(identity);
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => {
                let response = req.error_response(AppError::from(e));
                Box::pin(ready(Ok(response.map_into_right_body())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use serde_json::json;

    use super::*;
    use crate::auth::claims::Claims;
    use crate::auth::ttl::TokenTtl;
    use crate::state::security_config::SecurityConfig;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SecurityConfig::new("guard-unit-test-secret").unwrap())
    }

    fn user(id: &str) -> Claims {
        json!({ "userId": id }).as_object().cloned().unwrap()
    }

    #[test]
    fn public_skips_credentials_entirely() {
        let codec = codec();

        for header in [None, Some("Basic xyz"), Some("Bearer garbage"), Some("")] {
            assert_eq!(
                authenticate(RouteVisibility::Public, header.map(str::as_bytes), &codec),
                Ok(None)
            );
        }
    }

    #[test]
    fn protected_requires_bearer() {
        let codec = codec();

        assert_eq!(
            authenticate(RouteVisibility::Protected, None, &codec),
            Err(AuthError::MissingCredential)
        );
        assert_eq!(
            authenticate(RouteVisibility::Protected, Some("bearer x".as_bytes()), &codec),
            Err(AuthError::MissingCredential)
        );
        assert_eq!(
            authenticate(RouteVisibility::Protected, Some("Bearer garbage".as_bytes()), &codec),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            authenticate(RouteVisibility::Protected, Some("Bearer ".as_bytes()), &codec),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn protected_rejects_expired() {
        let codec = codec();
        let issued = SystemTime::now() - Duration::from_secs(120);
        let token = codec
            .sign_at(&user("u1"), TokenTtl::from_secs(60).unwrap(), issued)
            .unwrap();
        let header = format!("Bearer {token}");

        assert_eq!(
            authenticate(RouteVisibility::Protected, Some(header.as_bytes()), &codec),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn protected_yields_identity() {
        let codec = codec();
        let header = format!("Bearer {}", codec.sign(&user("u1")).unwrap());

        let identity = authenticate(RouteVisibility::Protected, Some(header.as_bytes()), &codec)
            .unwrap()
            .unwrap();
        assert_eq!(identity.user_id(), Some("u1"));
    }

    #[test]
    fn unknown_methods_are_protected() {
        let guard = AuthGuard::new(HashMap::from([(Method::GET, RouteVisibility::Public)]));

        assert_eq!(guard.visibility_for(&Method::GET), RouteVisibility::Public);
        assert_eq!(guard.visibility_for(&Method::POST), RouteVisibility::Protected);
        assert_eq!(
            AuthGuard::default().visibility_for(&Method::GET),
            RouteVisibility::Protected
        );
    }
}
