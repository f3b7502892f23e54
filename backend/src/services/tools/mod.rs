//! # Tool Catalog Service
//!
//! Routes under `/api/tools`: the public listing and lookups, submissions,
//! admin maintenance and the two interaction endpoints (bookmark, review).
//!
//! ## Sub-modules:
//! - `list`: filtered, sorted, paginated listing of approved tools.
//! - `featured`: the ten best-rated featured tools.
//! - `by_category`: approved tools counted per category name.
//! - `get`: single-tool read, which also counts a view.
//! - `create`: public submission, always stored unapproved.
//! - `update`: admin edit and approval.
//! - `delete`: admin hard delete.
//! - `bookmark`: per-user bookmark toggle.
//! - `review`: per-user review and running rating average.

mod bookmark;
mod by_category;
mod create;
mod delete;
mod featured;
mod get;
mod list;
mod review;
mod update;

#[cfg(test)]
mod tests;

use crate::error::ApiError;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/tools";

/// Configures and returns the Actix `Scope` for the tool routes.
///
/// The fixed segments (`/featured`, `/categories`) are registered before
/// `/{id}` so they are not captured as ids.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/featured", get().to(featured::process))
        .route("/categories", get().to(by_category::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/approve", put().to(update::approve))
        .route("/{id}/bookmark", post().to(bookmark::process))
        .route("/{id}/review", post().to(review::process))
}

/// Rejects ids that are not 24-character hex strings.
pub(crate) fn checked_id(id: &str) -> Result<&str, ApiError> {
    if crate::db::is_object_id(id) {
        Ok(id)
    } else {
        Err(ApiError::BadRequest("Invalid tool ID".to_string()))
    }
}
