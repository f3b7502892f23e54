use crate::db::rows::{
    category_from_row, load_subcategories, query_tools, CATEGORY_COLUMNS, TOOL_COLUMNS,
};
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::category::CategoryDetail;
use common::responses::ApiResponse;
use rusqlite::{params, OptionalExtension};

/// Actix web handler for `GET /api/categories/{slug}`.
///
/// # Arguments
/// * `slug` - The category slug, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the category plus its approved tools, best rated first.
/// - `404 Not Found` when no category has that slug.
pub async fn process(db: web::Data<Database>, slug: web::Path<String>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let category = conn
        .query_row(
            &format!("SELECT {} FROM categories WHERE slug = ?1", CATEGORY_COLUMNS),
            params![slug.as_str()],
            category_from_row,
        )
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;
    let category = load_subcategories(&conn, category)?;

    let tools = query_tools(
        &conn,
        &format!(
            "SELECT {} FROM tools WHERE approved = 1 AND category = ?1 ORDER BY rating DESC",
            TOOL_COLUMNS
        ),
        params![category.name],
    )?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryDetail { category, tools })))
}
