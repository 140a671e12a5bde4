use std::error::Error as StdError;

use actix_web::body::BoxBody;
use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::error::AuthError;
use crate::errors::ErrorCode;

const GENERIC_SERVER_MESSAGE: &str = "Internal server error";

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Stable, client-safe error shape: `{ "error": <code>, "message": <text> }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: code.as_str().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal error: {detail}")]
    Internal {
        detail: String,
        #[source]
        source: Option<BoxError>,
    },
    /// A failure raised outside this crate (framework extractors, payload
    /// limits, ...) that reached the boundary carrying only a status.
    #[error("Unhandled error ({status}): {detail}")]
    Unhandled { status: StatusCode, detail: String },
}

impl AppError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn internal_with<E>(detail: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Internal {
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    /// Wrap a foreign actix error, keeping its declared status.
    pub fn unhandled(err: &actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        let status = if status.is_client_error() || status.is_server_error() {
            status
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self::Unhandled {
            status,
            detail: format!("{err:?}"),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Auth(_) => ErrorCode::Unauthorized,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            AppError::Internal { .. } | AppError::Unhandled { .. } => {
                ErrorCode::InternalServerError
            }
        }
    }

    /// Client-facing text. Never carries internal detail for server errors.
    pub fn message(&self) -> String {
        match self {
            AppError::Auth(e) => e.to_string(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::Internal { .. } => GENERIC_SERVER_MESSAGE.to_string(),
            AppError::Unhandled { status, .. } if status.is_client_error() => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            AppError::Unhandled { .. } => GENERIC_SERVER_MESSAGE.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unhandled { status, .. } => *status,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.code(), self.message())
    }

    /// Log the full error, source chain included, on the server side.
    pub fn log(&self, request_id: &str) {
        let status = self.status().as_u16();
        let code = self.code().as_str();

        match self {
            AppError::Auth(reason) => {
                warn!(request_id, status, code, reason = %reason, "authentication rejected");
            }
            _ if self.status().is_server_error() => {
                error!(
                    request_id,
                    status,
                    code,
                    error = %self,
                    chain = %self.source_chain(),
                    debug = ?self,
                    "request failed"
                );
            }
            _ => {
                warn!(request_id, status, code, error = %self, "request failed");
            }
        }
    }

    fn source_chain(&self) -> String {
        let mut chain = Vec::new();
        let mut current = StdError::source(self);
        while let Some(err) = current {
            chain.push(err.to_string());
            current = err.source();
        }
        chain.join(": ")
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut builder = HttpResponse::build(self.status());
        if let AppError::Auth(_) = self {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(self.body())
    }
}
