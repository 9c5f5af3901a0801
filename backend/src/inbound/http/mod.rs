//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod gadgets;
pub mod gadgets_dto;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the account and gadget API under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(auth::signup)
            .service(auth::login),
    )
    .configure(gadgets::configure);
}
