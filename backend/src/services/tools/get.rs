//! # Tool Detail
//!
//! `GET /api/tools/{id}`. Reading a tool counts as a view: the counter is
//! bumped with a single `UPDATE ... SET view_count = view_count + 1` before
//! the row is loaded, so the returned document already includes this view
//! and concurrent readers never lose an increment.

use super::checked_id;
use crate::db::rows::find_tool;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::tool::Tool;
use common::responses::ApiResponse;
use rusqlite::params;

/// Actix web handler for `GET /api/tools/{id}`.
///
/// # Returns
/// - `200 OK` with the tool.
/// - `400 Bad Request` when the id is not a 24-character hex string.
/// - `404 Not Found` when no tool has that id.
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let tool = view_tool(&db, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tool)))
}

pub async fn view_tool(db: &Database, id: &str) -> ApiResult<Tool> {
    let conn = db.lock().await;
    let updated = conn.execute(
        "UPDATE tools SET view_count = view_count + 1 WHERE id = ?1",
        params![id],
    )?;
    if updated == 0 {
        return Err(ApiError::NotFound("Tool not found".to_string()));
    }
    find_tool(&conn, id)?.ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))
}
