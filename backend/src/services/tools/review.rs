//! # Reviews
//!
//! `POST /api/tools/{id}/review` records the caller's rating of a tool and
//! folds it into the tool's running average.
//!
//! A user holds at most one review per tool. The average moves in a single
//! `UPDATE` so concurrent reviewers never read a stale `(rating, n)` pair:
//! - first review: `rating = (rating * n + r) / (n + 1)`, `n = n + 1`
//! - replacement:  `rating = (rating * n - old + r) / n`, `n` unchanged

use super::checked_id;
use crate::auth::CurrentUser;
use crate::db::{timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::tool::ReviewOutcome;
use common::requests::ReviewRequest;
use common::responses::ApiResponse;
use log::info;
use rusqlite::{params, OptionalExtension};
use validator::Validate;

/// Actix web handler for `POST /api/tools/{id}/review`.
///
/// # Arguments
/// * `caller` - The reviewing account.
/// * `id` - The tool id, extracted from the URL path.
/// * `payload` - A rating from 1 to 5 and an optional comment.
///
/// # Returns
/// - `200 OK` with the tool's new average and review count.
/// - `400 Bad Request` for a malformed id or an invalid rating.
/// - `401 Unauthorized` without a valid identity.
/// - `404 Not Found` when no tool has that id.
pub async fn process(
    db: web::Data<Database>,
    caller: CurrentUser,
    id: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let payload = payload.into_inner();
    payload.validate()?;
    let rating = payload
        .rating
        .ok_or_else(|| ApiError::field("rating", "Rating is required"))?;
    let comment = payload
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let outcome = submit_review(&db, &caller.0.id, id, rating, comment).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        outcome,
        "Review submitted successfully",
    )))
}

pub async fn submit_review(
    db: &Database,
    user_id: &str,
    tool_id: &str,
    rating: u8,
    comment: Option<&str>,
) -> ApiResult<ReviewOutcome> {
    let conn = db.lock().await;
    let exists = conn
        .query_row("SELECT 1 FROM tools WHERE id = ?1", params![tool_id], |_| Ok(()))
        .optional()?
        .is_some();
    if !exists {
        return Err(ApiError::NotFound("Tool not found".to_string()));
    }

    let previous: Option<i64> = conn
        .query_row(
            "SELECT rating FROM user_reviews WHERE user_id = ?1 AND tool_id = ?2
             ORDER BY created_at DESC LIMIT 1",
            params![user_id, tool_id],
            |row| row.get(0),
        )
        .optional()?;

    let now = timestamp(Utc::now());
    conn.execute(
        "DELETE FROM user_reviews WHERE user_id = ?1 AND tool_id = ?2",
        params![user_id, tool_id],
    )?;
    conn.execute(
        "INSERT INTO user_reviews (user_id, tool_id, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, tool_id, rating, comment, now],
    )?;

    match previous {
        None => conn.execute(
            "UPDATE tools
             SET rating = (rating * review_count + ?2) / (review_count + 1),
                 review_count = review_count + 1
             WHERE id = ?1",
            params![tool_id, f64::from(rating)],
        )?,
        // A counter of zero here means it drifted from the review rows.
        Some(old) => conn.execute(
            "UPDATE tools
             SET rating = CASE WHEN review_count > 0
                     THEN (rating * review_count - ?3 + ?2) / review_count
                     ELSE ?2 END,
                 review_count = MAX(review_count, 1)
             WHERE id = ?1",
            params![tool_id, f64::from(rating), old as f64],
        )?,
    };
    conn.execute(
        "UPDATE users SET updated_at = ?2 WHERE id = ?1",
        params![user_id, now],
    )?;
    info!(
        "user {} rated tool {} {}{}",
        user_id,
        tool_id,
        rating,
        if previous.is_some() { " (replaced)" } else { "" }
    );

    let outcome = conn.query_row(
        "SELECT rating, review_count FROM tools WHERE id = ?1",
        params![tool_id],
        |row| {
            Ok(ReviewOutcome {
                rating: row.get(0)?,
                review_count: row.get(1)?,
            })
        },
    )?;
    Ok(outcome)
}
