use actix_web::{web, App, HttpServer};
use gateway::config::AppConfig;
use gateway::middleware::{NormalizeErrors, RequestTrace, StructuredLogger};
use gateway::routes;
use gateway::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration is resolved once, before any socket is bound. A missing
    // JWT_SECRET stops the process here.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid startup configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        token_ttl = %config.security.token_ttl,
        "starting auth gateway"
    );

    let data = web::Data::new(AppState::new(&config.security));

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizeErrors)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
