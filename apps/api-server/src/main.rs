//! # Posts API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, middleware::from_fn};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::observability::request_id;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppState, configure_app};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Posts API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::from_config(&config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(request_id))
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
