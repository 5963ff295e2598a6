//! # Posts API Server
//!
//! Actix-web application exposing the post resource under `/api/posts`.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_web::web;

pub use state::AppState;

/// Register shared state and every route on an `App`.
///
/// ```ignore
/// App::new().configure(api_server::configure_app(state.clone()))
/// ```
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state));
        handlers::configure_routes(cfg);
    }
}
