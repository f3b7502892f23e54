//! HTTP surface. Each submodule owns one `/api/...` scope and exposes it via
//! `configure_routes()`.

pub mod analytics;
pub mod categories;
pub mod newsletter;
pub mod search;
pub mod tools;
pub mod users;
pub mod webhooks;

use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use actix_web::web;

/// Registers shared state, extractor error handling and every API scope.
///
/// Malformed bodies, query strings and path segments are answered with the
/// same 400 envelope as validation failures.
pub fn configure(cfg: &mut web::ServiceConfig, db: Database, config: Config) {
    let json_limit = config.json_limit;

    cfg.app_data(web::Data::new(db))
        .app_data(web::Data::new(config))
        .app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(|err, _req| {
                    ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
                }),
        )
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            ApiError::BadRequest(format!("Invalid query parameters: {}", err)).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            ApiError::BadRequest(format!("Invalid path: {}", err)).into()
        }))
        .service(tools::configure_routes())
        .service(search::configure_routes())
        .service(categories::configure_routes())
        .service(analytics::configure_routes())
        .service(newsletter::configure_routes())
        .service(users::configure_routes())
        .service(webhooks::configure_routes());
}
