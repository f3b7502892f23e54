//! # Analytics Service
//!
//! Read-only rollups for the admin dashboard, plus the public tracking hook.
//!
//! # Registered Routes:
//!
//! *   **`GET /dashboard`** (admin): totals, per-category counts, leaderboards,
//!     trailing 30-day activity and monthly growth. Any failing sub-query
//!     fails the whole response.
//! *   **`GET /tools?period=7d|30d|90d|1y`** (admin): daily submissions in the
//!     window, category and status distributions.
//! *   **`POST /track`**: records a client event. `view` events bump the
//!     tool's view counter; everything else is only logged.

mod dashboard;
mod tool_stats;
mod track;


use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/analytics";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/dashboard", get().to(dashboard::process))
        .route("/tools", get().to(tool_stats::process))
        .route("/track", post().to(track::process))
}
