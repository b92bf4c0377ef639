//! HTTP handlers and route configuration.

mod auth;
mod health;
mod reminders;


use actix_web::web;
use serde::de::DeserializeOwned;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        // Session routes
        .route("/logout", web::post().to(auth::logout))
        .route("/me", web::get().to(auth::me))
        // Reminder routes
        .service(
            web::resource("/reminders")
                .route(web::get().to(reminders::list))
                .route(web::post().to(reminders::create)),
        )
        .route("/reminders/{id}", web::delete().to(reminders::delete));
}

/// Decode a JSON request body. An empty body decodes as every field missing.
fn parse_body<T: DeserializeOwned + Default>(body: &web::Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::MalformedBody(format!("JSON parse error - {}", e)))
}
