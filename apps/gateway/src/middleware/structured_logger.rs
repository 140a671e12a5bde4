use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::RequestId;
use crate::auth::claims::Identity;

/// One `request_completed` event per request, levelled by status class.
///
/// The caller's `userId` is included when the auth guard attached an identity;
/// tokens and headers are never logged.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completed {
    method: String,
    path: String,
    request_id: String,
    user_id: Option<String>,
    status: StatusCode,
    duration_us: u64,
}

impl Completed {
    fn emit(&self) {
        let status_code = self.status.as_u16();
        let user_id = self.user_id.as_deref().unwrap_or("-");

        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, request_id = %self.request_id, user_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, request_id = %self.request_id, user_id, "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, duration_us = self.duration_us, request_id = %self.request_id, user_id, "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let request_id = RequestId::of(req.request());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, user_id) = match &result {
                Ok(res) => {
                    let user_id = res
                        .request()
                        .extensions()
                        .get::<Identity>()
                        .and_then(|identity| identity.user_id().map(str::to_string));
                    (res.status(), user_id)
                }
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completed {
                method,
                path,
                request_id,
                user_id,
                status,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}
