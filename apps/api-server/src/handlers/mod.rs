//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post resource - every route is behind the auth gate
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::index))
                    .route(web::post().to(posts::store)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(posts::show))
                    .route(web::put().to(posts::update))
                    .route(web::delete().to(posts::destroy)),
            ),
    );
}
