use crate::db::rows::{query_tools, TOOL_COLUMNS};
use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::requests::{ToolListQuery, ToolSort};
use common::responses::{ApiResponse, Pagination, ToolPage};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use validator::Validate;

const DEFAULT_LIMIT: u32 = 12;

/// Actix web handler for `GET /api/tools`.
///
/// # Arguments
/// * `query` - Optional filters, sort mode and paging.
///
/// # Returns
/// - `200 OK` with one page of approved tools and its pagination block.
/// - `400 Bad Request` when the paging is out of range.
pub async fn process(
    db: web::Data<Database>,
    query: web::Query<ToolListQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;
    let page = list_tools(&db, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

fn order_by(sort: ToolSort) -> &'static str {
    match sort {
        ToolSort::Newest => "created_at DESC",
        ToolSort::Oldest => "created_at ASC",
        ToolSort::Rating => "rating DESC",
        ToolSort::Popular => "view_count DESC",
        ToolSort::Name => "name COLLATE NOCASE ASC",
        ToolSort::Default => "featured DESC, rating DESC, created_at DESC",
    }
}

/// Approved tools matching the optional `category`, `featured` and `status`
/// filters, sorted and sliced to the requested page.
pub async fn list_tools(db: &Database, query: &ToolListQuery) -> ApiResult<ToolPage> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let mut clauses = vec!["approved = 1".to_string()];
    let mut args: Vec<Value> = Vec::new();

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        args.push(Value::Text(category.to_string()));
        clauses.push(format!("category = ?{}", args.len()));
    }
    if query.featured == Some(true) {
        clauses.push("featured = 1".to_string());
    }
    if let Some(status) = query.status {
        args.push(Value::Text(status.as_str().to_string()));
        clauses.push(format!("status = ?{}", args.len()));
    }
    let where_clause = clauses.join(" AND ");

    let conn = db.lock().await;
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM tools WHERE {}", where_clause),
        params_from_iter(args.iter()),
        |row| row.get(0),
    )?;
    let pagination = Pagination::new(page, limit, total as u64).with_navigation();

    let sql = format!(
        "SELECT {} FROM tools WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
        TOOL_COLUMNS,
        where_clause,
        order_by(ToolSort::from_query(query.sort.as_deref())),
        pagination.items_per_page,
        pagination.offset()
    );
    let tools = query_tools(&conn, &sql, params_from_iter(args.iter()))?;

    Ok(ToolPage { tools, pagination })
}
