use super::engine::{self, Matcher};
use crate::db::rows::{query_tools, TOOL_COLUMNS};
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::search::SearchResults;
use common::model::tool::Tool;
use common::requests::SearchQuery;
use common::responses::{ApiResponse, Pagination};
use log::debug;
use rusqlite::params;
use validator::Validate;

const DEFAULT_LIMIT: u32 = 20;

/// Actix web handler for `GET /api/search`.
///
/// # Arguments
/// * `query` - The search text `q` plus optional `category`, comma-separated
///   `tags` and paging.
///
/// # Returns
/// - `200 OK` with the matching tools, name suggestions and pagination.
/// - `400 Bad Request` when `q` is missing or the paging is out of range.
pub async fn process(
    db: web::Data<Database>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;
    let results = run_search(&db, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(results)))
}

/// Trims the `q` parameter; whitespace-only input is reported like a
/// missing one.
pub(super) fn search_text(q: Option<&str>) -> ApiResult<&str> {
    q.map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::field("q", "Search query is required"))
}

pub(super) fn matcher(text: &str) -> ApiResult<Matcher> {
    Matcher::new(text).map_err(|e| ApiError::Internal(format!("search pattern: {}", e)))
}

/// Approved tools in store order, optionally restricted to one category.
pub(super) fn approved_tools(
    conn: &rusqlite::Connection,
    category: Option<&str>,
) -> rusqlite::Result<Vec<Tool>> {
    match category {
        Some(category) => query_tools(
            conn,
            &format!(
                "SELECT {} FROM tools WHERE approved = 1 AND category = ?1 ORDER BY rowid",
                TOOL_COLUMNS
            ),
            params![category],
        ),
        None => query_tools(
            conn,
            &format!(
                "SELECT {} FROM tools WHERE approved = 1 ORDER BY rowid",
                TOOL_COLUMNS
            ),
            [],
        ),
    }
}

pub async fn run_search(db: &Database, query: &SearchQuery) -> ApiResult<SearchResults> {
    let text = search_text(query.q.as_deref())?;
    let matcher = matcher(text)?;
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let tags = query.tag_filter();

    let (candidates, all_approved) = {
        let conn = db.lock().await;
        let candidates = approved_tools(&conn, category)?;
        let all_approved = match category {
            Some(_) => approved_tools(&conn, None)?,
            None => candidates.clone(),
        };
        (candidates, all_approved)
    };

    let hits = engine::search(candidates, &matcher, &tags);
    let suggestions = engine::suggestions(&all_approved, &matcher);
    let pagination = Pagination::new(page, limit, hits.len() as u64);
    debug!("search '{}' matched {} tools", text, hits.len());

    let tools = hits
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(limit as usize)
        .collect();

    Ok(SearchResults {
        tools,
        suggestions,
        pagination,
        search_query: text.to_string(),
    })
}
