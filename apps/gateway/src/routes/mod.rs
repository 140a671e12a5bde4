use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;

pub mod health;
pub mod table;
pub mod whoami;

pub use table::{RouteTable, RouteVisibility};

/// The application's routes and their visibility.
pub fn route_table() -> RouteTable {
    RouteTable::new()
        .public(Method::GET, "/", health::root)
        .public(Method::GET, "/health", health::health)
        .protected(Method::GET, "/api/me", whoami::whoami)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    route_table().configure(cfg);
}

/// App-level default service for paths no resource matches.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}
