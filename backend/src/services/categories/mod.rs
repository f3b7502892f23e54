//! # Category Service
//!
//! Routes under `/api/categories`. Reads are public; writes need an admin.
//!
//! Tools reference categories by *name*, so the write paths guard that link:
//! a rename is cascaded onto every tool that used the old name, and a
//! category that is still referenced cannot be deleted.
//!
//! ## Sub-modules:
//! - `list`: every category with a fresh `toolCount`, and the featured subset.
//! - `detail`: one category by slug with its approved tools.
//! - `save`: create and update.
//! - `delete`: guarded delete.

mod delete;
mod detail;
mod list;
mod save;


use crate::error::ApiError;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/categories";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/featured", get().to(list::featured))
        .route("/{slug}", get().to(detail::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(delete::process))
}

pub(crate) fn checked_id(id: &str) -> Result<&str, ApiError> {
    if crate::db::is_object_id(id) {
        Ok(id)
    } else {
        Err(ApiError::BadRequest("Invalid category ID".to_string()))
    }
}
