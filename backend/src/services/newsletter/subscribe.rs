use super::normalize_email;
use crate::db::rows::{subscriber_from_row, SUBSCRIBER_COLUMNS};
use crate::db::{new_id, timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::newsletter::{Interest, Subscriber};
use common::requests::{SubscribeRequest, UnsubscribeRequest};
use common::responses::ApiResponse;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use validator::Validate;

fn find_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<Subscriber>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM newsletter_subscribers WHERE email = ?1",
            SUBSCRIBER_COLUMNS
        ),
        params![email],
        subscriber_from_row,
    )
    .optional()
}

fn interests_json(interests: &[Interest]) -> String {
    let mut unique = interests.to_vec();
    unique.sort();
    unique.dedup();
    serde_json::to_string(&unique).unwrap_or_else(|_| "[]".to_string())
}

/// How a subscribe request was satisfied.
enum Subscription {
    Created(Subscriber),
    Reactivated(Subscriber),
}

/// Actix web handler for `POST /api/newsletter/subscribe`.
///
/// # Arguments
/// * `payload` - The address plus optional interests and source.
///
/// # Returns
/// - `201 Created` for a new address.
/// - `200 OK` when a previously unsubscribed address is reactivated.
/// - `400 Bad Request` when the address is invalid or already subscribed.
pub async fn subscribe(
    db: web::Data<Database>,
    payload: web::Json<SubscribeRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;

    match subscribe_email(&db, &payload).await? {
        Subscription::Created(subscriber) => Ok(HttpResponse::Created().json(
            ApiResponse::ok_with_message(subscriber, "Successfully subscribed to newsletter"),
        )),
        Subscription::Reactivated(subscriber) => Ok(HttpResponse::Ok().json(
            ApiResponse::ok_with_message(subscriber, "Welcome back! Your subscription is active again"),
        )),
    }
}

async fn subscribe_email(db: &Database, payload: &SubscribeRequest) -> ApiResult<Subscription> {
    let email = normalize_email(&payload.email);
    let interests = interests_json(&payload.interests);
    let source = payload.source.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let now = timestamp(Utc::now());

    let conn = db.lock().await;
    match find_by_email(&conn, &email)? {
        Some(existing) if existing.is_active => Err(ApiError::BadRequest(
            "Email is already subscribed".to_string(),
        )),
        Some(existing) => {
            conn.execute(
                "UPDATE newsletter_subscribers
                 SET is_active = 1, interests = ?2, source = COALESCE(?3, source),
                     subscribed_at = ?4, unsubscribed_at = NULL, unsubscribe_reason = NULL,
                     updated_at = ?4
                 WHERE id = ?1",
                params![existing.id, interests, source, now],
            )?;
            info!("newsletter subscription reactivated for {}", email);
            let subscriber = find_by_email(&conn, &email)?
                .ok_or_else(|| ApiError::Internal(format!("subscriber {} vanished", email)))?;
            Ok(Subscription::Reactivated(subscriber))
        }
        None => {
            conn.execute(
                "INSERT INTO newsletter_subscribers (id, email, interests, source, is_active,
                    subscribed_at, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5, ?5)",
                params![new_id(), email, interests, source, now],
            )
            .map_err(|e| ApiError::unique_violation(e, "Email is already subscribed"))?;
            info!("new newsletter subscriber {}", email);
            let subscriber = find_by_email(&conn, &email)?
                .ok_or_else(|| ApiError::Internal(format!("subscriber {} vanished", email)))?;
            Ok(Subscription::Created(subscriber))
        }
    }
}

/// Actix web handler for `POST /api/newsletter/unsubscribe`.
///
/// # Arguments
/// * `payload` - The address and an optional reason.
///
/// # Returns
/// - `200 OK` once the subscription is deactivated.
/// - `400 Bad Request` when the address is invalid or already unsubscribed.
/// - `404 Not Found` when the address never subscribed.
pub async fn unsubscribe(
    db: web::Data<Database>,
    payload: web::Json<UnsubscribeRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;
    let email = normalize_email(&payload.email);
    let reason = payload.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());

    let conn = db.lock().await;
    let subscriber = find_by_email(&conn, &email)?
        .ok_or_else(|| ApiError::NotFound("Email not found in subscribers".to_string()))?;
    if !subscriber.is_active {
        return Err(ApiError::BadRequest(
            "Email is already unsubscribed".to_string(),
        ));
    }

    let now = timestamp(Utc::now());
    conn.execute(
        "UPDATE newsletter_subscribers
         SET is_active = 0, unsubscribed_at = ?2, unsubscribe_reason = ?3, updated_at = ?2
         WHERE id = ?1",
        params![subscriber.id, now, reason],
    )?;
    info!("newsletter unsubscribe for {}", email);
    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Successfully unsubscribed from newsletter",
    )))
}
