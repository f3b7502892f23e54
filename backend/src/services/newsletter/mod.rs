//! # Newsletter Service
//!
//! Routes under `/api/newsletter`. Subscribing and unsubscribing are public;
//! the subscriber list, stats and CSV export need an admin.
//!
//! Emails are stored lowercased so one address maps to one row whatever
//! casing the form sent. Unsubscribing keeps the row; subscribing again
//! reactivates it.

mod export;
mod stats;
mod subscribe;
mod subscribers;

#[cfg(test)]
mod tests;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/newsletter";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/subscribe", post().to(subscribe::subscribe))
        .route("/unsubscribe", post().to(subscribe::unsubscribe))
        .route("/subscribers", get().to(subscribers::process))
        .route("/stats", get().to(stats::process))
        .route("/export", get().to(export::process))
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
