//! Boundary catch-all for errors.
//!
//! Wraps the whole application. Every error that reaches it is logged once,
//! with its source chain and the request id, and anything that is not already
//! an [`AppError`] is re-rendered in the stable `{ error, message }` shape so
//! that no framework default body reaches a client.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use super::request_trace::RequestId;
use crate::error::AppError;

pub struct NormalizeErrors;

impl<S, B> Transform<S, ServiceRequest> for NormalizeErrors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = NormalizeErrorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(NormalizeErrorsMiddleware { service }))
    }
}

pub struct NormalizeErrorsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for NormalizeErrorsMiddleware<S>
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
        let request_id = RequestId::of(req.request());
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(normalize_response(res)),
                Err(err) => Err(normalize_error(err, &request_id)),
            }
        })
    }
}

/// Handler errors arrive as responses with the error attached.
fn normalize_response<B>(res: ServiceResponse<B>) -> ServiceResponse<EitherBody<B>> {
    let request_id = RequestId::of(res.request());

    let replacement = match res.response().error() {
        None => None,
        Some(err) => match err.as_error::<AppError>() {
            Some(app_err) => {
                app_err.log(&request_id);
                None
            }
            None => {
                let app_err = AppError::unhandled(err);
                app_err.log(&request_id);
                Some(app_err)
            }
        },
    };

    match replacement {
        None => res.map_into_left_body(),
        Some(app_err) => {
            let (req, _) = res.into_parts();
            ServiceResponse::new(req, app_err.error_response()).map_into_right_body()
        }
    }
}

/// Middleware errors carry no response yet; actix renders whatever we return.
fn normalize_error(err: Error, request_id: &str) -> Error {
    if let Some(app_err) = err.as_error::<AppError>() {
        app_err.log(request_id);
        return err;
    }

    let app_err = AppError::unhandled(&err);
    app_err.log(request_id);
    app_err.into()
}
