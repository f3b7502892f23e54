//! # Identity Provider Webhooks
//!
//! `POST /api/webhooks/clerk` keeps local accounts in step with the identity
//! provider. Deliveries must carry the `svix-id`, `svix-timestamp` and
//! `svix-signature` headers; the signature itself is not verified here.

mod clerk;


use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/webhooks";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/clerk", post().to(clerk::process))
}
