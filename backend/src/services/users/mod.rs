//! # User Service
//!
//! Routes under `/api/users`.
//!
//! ## Sub-modules:
//! - `register`: self-registration of plain user accounts.
//! - `session`: login bookkeeping and the caller's own profile.

mod register;
mod session;

#[cfg(test)]
mod tests;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/register", post().to(register::process))
        .route("/login", post().to(session::login))
        .route("/me", get().to(session::me))
}
