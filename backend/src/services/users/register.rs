use crate::db::rows::find_user_by_subject;
use crate::db::{new_id, timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::user::{User, UserRole};
use common::requests::RegisterUserRequest;
use common::responses::ApiResponse;
use log::info;
use rusqlite::params;
use validator::Validate;

/// Actix web handler for `POST /api/users/register`.
///
/// Self-registration always creates a plain `user` account. Accounts linked
/// to the identity provider, and the admin role for configured emails, only
/// come from its webhook.
///
/// # Arguments
/// * `payload` - Email, username and optional profile fields. A `clerkId` is
///   refused.
///
/// # Returns
/// - `201 Created` with the new account.
/// - `400 Bad Request` on validation failure, a supplied `clerkId`, or an
///   email that is already registered.
pub async fn process(
    db: web::Data<Database>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;
    if payload.clerk_id.as_deref().is_some_and(|c| !c.trim().is_empty()) {
        return Err(ApiError::field(
            "clerkId",
            "clerkId is assigned by the identity provider",
        ));
    }
    let user = register_user(&db, &payload).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        user,
        "User registered successfully",
    )))
}

pub async fn register_user(db: &Database, payload: &RegisterUserRequest) -> ApiResult<User> {
    let email = payload.email.trim().to_lowercase();

    let id = new_id();
    let now = timestamp(Utc::now());
    let conn = db.lock().await;
    conn.execute(
        "INSERT INTO users (id, email, username, first_name, last_name, image_url, role,
            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            id,
            email,
            payload.username.trim(),
            payload.first_name,
            payload.last_name,
            payload.image_url,
            UserRole::User.as_str(),
            now,
        ],
    )
    .map_err(|e| ApiError::unique_violation(e, "User with this email already exists"))?;
    info!("user {} registered", email);

    find_user_by_subject(&conn, &id)?
        .ok_or_else(|| ApiError::Internal(format!("user {} vanished", id)))
}
