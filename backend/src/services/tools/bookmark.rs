//! # Bookmark Toggle
//!
//! `POST /api/tools/{id}/bookmark` flips the caller's bookmark on a tool.
//!
//! Two autocommit statements run in order: the user's bookmark row is
//! inserted or removed first, then the tool's `bookmark_count` is moved by
//! one (never below zero). There is no surrounding transaction, so a failure
//! between the two leaves the counter one step away from the list.

use super::checked_id;
use crate::auth::CurrentUser;
use crate::db::{timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::tool::BookmarkState;
use common::responses::ApiResponse;
use log::debug;
use rusqlite::{params, OptionalExtension};

/// Actix web handler for `POST /api/tools/{id}/bookmark`.
///
/// # Arguments
/// * `caller` - The account whose bookmark is toggled.
/// * `id` - The tool id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the new bookmark state and count.
/// - `400 Bad Request` for a malformed id.
/// - `401 Unauthorized` without a valid identity.
/// - `404 Not Found` when no tool has that id.
pub async fn process(
    db: web::Data<Database>,
    caller: CurrentUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let state = toggle_bookmark(&db, &caller.0.id, id).await?;
    let message = if state.bookmarked {
        "Tool bookmarked"
    } else {
        "Bookmark removed"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(state, message)))
}

pub async fn toggle_bookmark(db: &Database, user_id: &str, tool_id: &str) -> ApiResult<BookmarkState> {
    let conn = db.lock().await;
    let exists = conn
        .query_row("SELECT 1 FROM tools WHERE id = ?1", params![tool_id], |_| Ok(()))
        .optional()?
        .is_some();
    if !exists {
        return Err(ApiError::NotFound("Tool not found".to_string()));
    }

    let now = timestamp(Utc::now());
    let removed = conn.execute(
        "DELETE FROM user_bookmarks WHERE user_id = ?1 AND tool_id = ?2",
        params![user_id, tool_id],
    )?;
    let bookmarked = removed == 0;
    if bookmarked {
        conn.execute(
            "INSERT INTO user_bookmarks (user_id, tool_id, created_at) VALUES (?1, ?2, ?3)",
            params![user_id, tool_id, now],
        )?;
        conn.execute(
            "UPDATE tools SET bookmark_count = bookmark_count + 1 WHERE id = ?1",
            params![tool_id],
        )?;
    } else {
        conn.execute(
            "UPDATE tools SET bookmark_count = MAX(bookmark_count - 1, 0) WHERE id = ?1",
            params![tool_id],
        )?;
    }
    conn.execute(
        "UPDATE users SET updated_at = ?2 WHERE id = ?1",
        params![user_id, now],
    )?;
    debug!("user {} bookmark on {}: {}", user_id, tool_id, bookmarked);

    let bookmark_count = conn.query_row(
        "SELECT bookmark_count FROM tools WHERE id = ?1",
        params![tool_id],
        |row| row.get(0),
    )?;
    Ok(BookmarkState {
        bookmarked,
        bookmark_count,
    })
}
