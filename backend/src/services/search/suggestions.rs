use super::engine;
use super::query::{approved_tools, matcher, search_text};
use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::requests::SuggestionQuery;
use common::responses::ApiResponse;
use validator::Validate;

/// Actix web handler for `GET /api/search/suggestions?q=`.
///
/// Matches names and tags only; no tool documents are returned.
///
/// # Arguments
/// * `query` - The search text `q`, 1 to 100 characters.
///
/// # Returns
/// - `200 OK` with the suggestion list.
/// - `400 Bad Request` when `q` is missing or too long.
pub async fn process(
    db: web::Data<Database>,
    query: web::Query<SuggestionQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;
    let matcher = matcher(search_text(query.q.as_deref())?)?;

    let tools = {
        let conn = db.lock().await;
        approved_tools(&conn, None)?
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(engine::suggestions(&tools, &matcher))))
}
