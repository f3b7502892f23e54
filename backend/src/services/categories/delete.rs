use super::checked_id;
use crate::auth::AdminUser;
use crate::db::rows::find_category;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::responses::ApiResponse;
use log::{info, warn};
use rusqlite::params;

/// Actix web handler for `DELETE /api/categories/{id}` (admin).
///
/// Refused while any tool, approved or not, is filed under the category's
/// name. Child categories are detached rather than deleted.
///
/// # Arguments
/// * `admin` - The acting administrator.
/// * `id` - The category id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` once the category is removed.
/// - `400 Bad Request` for a malformed id or a category still in use.
/// - `404 Not Found` when no category has that id.
pub async fn process(
    db: web::Data<Database>,
    admin: AdminUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let conn = db.lock().await;
    let category = find_category(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let referenced: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tools WHERE category = ?1",
        params![category.name],
        |row| row.get(0),
    )?;
    if referenced > 0 {
        warn!(
            "refusing to delete category '{}': {} tools reference it",
            category.name, referenced
        );
        return Err(ApiError::BadRequest(
            "Cannot delete category with existing tools".to_string(),
        ));
    }

    conn.execute(
        "UPDATE categories SET parent_id = NULL WHERE parent_id = ?1",
        params![id],
    )?;
    conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
    info!("category '{}' deleted by {}", category.name, admin.0.id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted successfully")))
}
