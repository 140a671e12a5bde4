//! Route registration with an explicit per-route visibility flag.
//!
//! Every route is either `Protected` (the default) or `Public`. The flag is
//! stored next to the route at registration time and handed to the
//! [`AuthGuard`] wrapping the resource, which looks it up on each request.

use std::collections::HashMap;

use actix_web::http::Method;
use actix_web::{web, FromRequest, Handler, HttpResponse, Responder, Route};

use crate::auth::guard::AuthGuard;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteVisibility {
    /// Requires a valid bearer token.
    #[default]
    Protected,
    /// Exempt from authentication; no identity is attached.
    Public,
}

impl RouteVisibility {
    pub fn is_public(self) -> bool {
        matches!(self, RouteVisibility::Public)
    }
}

struct RouteEntry {
    path: String,
    visibility: HashMap<Method, RouteVisibility>,
    routes: Vec<Route>,
}

/// Routing table: path → (method → handler, visibility).
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` on `path`.
    ///
    /// The first registration of a (method, path) pair wins, for both the
    /// handler and its visibility.
    pub fn route<F, Args>(
        mut self,
        method: Method,
        path: &str,
        visibility: RouteVisibility,
        handler: F,
    ) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        let route = web::method(method.clone()).to(handler);

        let index = match self.entries.iter().position(|entry| entry.path == path) {
            Some(index) => index,
            None => {
                self.entries.push(RouteEntry {
                    path: path.to_string(),
                    visibility: HashMap::new(),
                    routes: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        entry.visibility.entry(method).or_insert(visibility);
        entry.routes.push(route);
        self
    }

    pub fn public<F, Args>(self, method: Method, path: &str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(method, path, RouteVisibility::Public, handler)
    }

    pub fn protected<F, Args>(self, method: Method, path: &str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(method, path, RouteVisibility::Protected, handler)
    }

    /// Visibility registered for `method` on `path`; `Protected` when absent.
    pub fn visibility(&self, method: &Method, path: &str) -> RouteVisibility {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .and_then(|entry| entry.visibility.get(method).copied())
            .unwrap_or_default()
    }

    /// Register every path as one guarded resource.
    pub fn configure(self, cfg: &mut web::ServiceConfig) {
        for entry in self.entries {
            let mut resource =
                web::resource(entry.path).default_service(web::to(method_not_allowed));
            for route in entry.routes {
                resource = resource.route(route);
            }
            cfg.service(resource.wrap(AuthGuard::new(entry.visibility)));
        }
    }
}

async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
