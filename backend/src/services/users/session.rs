use crate::auth::CurrentUser;
use crate::db::rows::{find_user_by_subject, query_tools, TOOL_COLUMNS};
use crate::db::{parse_timestamp, timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::user::{Review, UserProfile};
use common::responses::ApiResponse;
use rusqlite::{params, Connection};

/// Actix web handler for `POST /api/users/login`.
///
/// Stamps `lastLogin` and bumps `loginCount` on the caller's account.
///
/// # Arguments
/// * `caller` - The account resolved from the identity header.
///
/// # Returns
/// - `200 OK` with the updated account.
/// - `401 Unauthorized` when the header is missing, unknown or names a
///   deactivated account.
pub async fn login(db: web::Data<Database>, caller: CurrentUser) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let now = timestamp(Utc::now());
    conn.execute(
        "UPDATE users SET last_login = ?2, login_count = login_count + 1, updated_at = ?2
         WHERE id = ?1",
        params![caller.0.id, now],
    )?;
    let user = find_user_by_subject(&conn, &caller.0.id)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(user, "Login recorded")))
}

/// Actix web handler for `GET /api/users/me`.
///
/// Returns the caller with their bookmarks, submissions and reviews. Bookmarks
/// of deleted tools are skipped.
///
/// # Arguments
/// * `caller` - The account resolved from the identity header.
///
/// # Returns
/// - `200 OK` with the profile.
/// - `401 Unauthorized` without a valid identity.
pub async fn me(db: web::Data<Database>, caller: CurrentUser) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let user = caller.0;

    let bookmarked_tools = query_tools(
        &conn,
        &format!(
            "SELECT {} FROM tools
             JOIN user_bookmarks ON user_bookmarks.tool_id = tools.id
             WHERE user_bookmarks.user_id = ?1
             ORDER BY user_bookmarks.created_at DESC",
            qualified_tool_columns()
        ),
        params![user.id],
    )?;
    let submitted_tools = submitted_tool_ids(&conn, &user.id)?;
    let reviews = reviews_of(&conn, &user.id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserProfile {
        user,
        bookmarked_tools,
        submitted_tools,
        reviews,
    })))
}

/// `TOOL_COLUMNS` prefixed with `tools.` for use in joins.
fn qualified_tool_columns() -> String {
    TOOL_COLUMNS
        .split(',')
        .map(|column| format!("tools.{}", column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn submitted_tool_ids(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT tool_id FROM user_submitted_tools WHERE user_id = ?1 ORDER BY created_at ASC",
    )?;
    let ids = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(ids)
}

fn reviews_of(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT tool_id, rating, comment, created_at FROM user_reviews
         WHERE user_id = ?1 ORDER BY created_at DESC",
    )?;
    let reviews = stmt
        .query_map(params![user_id], |row| {
            let created_at: String = row.get(3)?;
            Ok(Review {
                tool: row.get(0)?,
                rating: row.get(1)?,
                comment: row.get(2)?,
                created_at: parse_timestamp(&created_at, 3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reviews)
}
