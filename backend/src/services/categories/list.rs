use crate::db::rows::{category_from_row, load_subcategories, CATEGORY_COLUMNS};
use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::model::category::Category;
use common::responses::ApiResponse;
use rusqlite::Connection;

/// Rewrites every `tool_count` from the current approved tools in one
/// statement.
pub fn recount_tools(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE categories SET tool_count = (
             SELECT COUNT(*) FROM tools
             WHERE tools.category = categories.name AND tools.approved = 1
         )",
        [],
    )
}

fn load_categories(conn: &Connection, featured_only: bool) -> rusqlite::Result<Vec<Category>> {
    let filter = if featured_only { "WHERE featured = 1" } else { "" };
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM categories {} ORDER BY sort_order ASC, name ASC",
        CATEGORY_COLUMNS, filter
    ))?;
    let categories = stmt
        .query_map([], category_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    categories
        .into_iter()
        .map(|category| load_subcategories(conn, category))
        .collect()
}

/// Actix web handler for `GET /api/categories`.
///
/// # Returns
/// - `200 OK` with every category and its recounted tool total.
pub async fn process(db: web::Data<Database>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    recount_tools(&conn)?;
    let categories = load_categories(&conn, false)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// Actix web handler for `GET /api/categories/featured`.
pub async fn featured(db: web::Data<Database>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    recount_tools(&conn)?;
    let categories = load_categories(&conn, true)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}
