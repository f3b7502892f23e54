//! # Search Service
//!
//! Routes under `/api/search`.
//!
//! # Registered Routes:
//!
//! *   **`GET ?q=&page=&limit=&category=&tags=`**: ranked, paginated text search
//!     over approved tools, with suggestions for the same query.
//! *   **`GET /suggestions?q=`**: suggestions only, for type-ahead.
//! *   **`GET /trending`**: the ten most used tags among approved tools.

mod engine;
mod query;
mod suggestions;
mod trending;


use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/search";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(query::process))
        .route("/suggestions", get().to(suggestions::process))
        .route("/trending", get().to(trending::process))
}
