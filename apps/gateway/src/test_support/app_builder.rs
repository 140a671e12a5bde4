//! Test service builder.
//! Given an AppState, build an initialized Actix **test service** wired with the
//! same middleware stack as the production server.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::{self, ServiceConfig};
use actix_web::{App, Error as ActixError};

use crate::config::ConfigError;
use crate::middleware::{NormalizeErrors, RequestTrace, StructuredLogger};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// AppState keyed with [`TEST_SECRET`].
pub fn test_state() -> Result<AppState, ConfigError> {
    Ok(AppState::new(&SecurityConfig::new(TEST_SECRET)?))
}

/// Function pointer for custom route configuration.
type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig)>;

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        router: Router::Prod,
    }
}

enum Router {
    Prod,
    Custom(RoutesFn),
}

pub struct TestAppBuilder {
    state: AppState,
    router: Router,
}

impl TestAppBuilder {
    /// Use the application's production routes (the default).
    pub fn with_prod_routes(mut self) -> Self {
        self.router = Router::Prod;
        self
    }

    /// Use custom routes for a test.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + 'static,
    {
        self.router = Router::Custom(Box::new(f));
        self
    }

    /// Build and initialize the Actix test service.
    pub async fn build(
        self,
    ) -> impl Service<
        actix_http::Request,
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = ActixError,
    > {
        let app = App::new()
            .wrap(NormalizeErrors)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state))
            .default_service(web::to(crate::routes::not_found));

        let app = match self.router {
            Router::Prod => app.configure(crate::routes::configure),
            Router::Custom(f) => app.configure(f),
        };

        actix_web::test::init_service(app).await
    }
}
