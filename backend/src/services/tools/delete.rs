use super::checked_id;
use crate::auth::AdminUser;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::responses::ApiResponse;
use log::info;
use rusqlite::params;

/// Actix web handler for `DELETE /api/tools/{id}` (admin). Hard delete.
///
/// Per-user bookmark and review rows pointing at the tool are left in place;
/// readers skip ids that no longer resolve.
///
/// # Arguments
/// * `admin` - The acting administrator.
/// * `id` - The tool id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` once the tool is removed.
/// - `400 Bad Request` for a malformed id.
/// - `404 Not Found` when no tool has that id.
pub async fn process(
    db: web::Data<Database>,
    admin: AdminUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let conn = db.lock().await;
    let deleted = conn.execute("DELETE FROM tools WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Tool not found".to_string()));
    }
    info!("tool {} deleted by {}", id, admin.0.id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Tool deleted successfully")))
}
