pub mod auth;
pub mod bugs;
pub mod health;
pub mod pages;

use actix_web::web;

/// Registers every route group: health, auth, JSON API, pages and functions
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(auth::configure)
        .configure(bugs::configure)
        .configure(crate::functions::configure)
        .configure(pages::configure);
}
