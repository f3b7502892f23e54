use crate::config::Config;
use crate::db::{new_id, timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::user::UserRole;
use common::responses::ApiResponse;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;

const SVIX_HEADERS: [&str; 3] = ["svix-id", "svix-timestamp", "svix-signature"];

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "type")]
    kind: String,
    data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailAddress {
    id: String,
    email_address: String,
}

/// The subset of the provider's user object mirrored locally.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderUser {
    id: String,
    email_addresses: Vec<EmailAddress>,
    primary_email_address_id: Option<String>,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
}

impl ProviderUser {
    /// The primary address, or the first one when no primary is flagged.
    fn primary_email(&self) -> Option<String> {
        let primary = self.primary_email_address_id.as_deref();
        self.email_addresses
            .iter()
            .find(|address| Some(address.id.as_str()) == primary)
            .or_else(|| self.email_addresses.first())
            .map(|address| address.email_address.trim().to_lowercase())
            .filter(|email| !email.is_empty())
    }

    fn username(&self, email: &str) -> String {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string())
    }
}

/// Actix web handler for `POST /api/webhooks/clerk`.
///
/// Applies `user.created`, `user.updated` and `user.deleted` deliveries from
/// the identity provider. Other event types are acknowledged and ignored.
///
/// # Arguments
/// * `req` - The raw request; the `svix-*` delivery headers must be present.
/// * `config` - Supplies the admin email list for accounts it creates or adopts.
/// * `body` - The delivery payload.
///
/// # Returns
/// - `200 OK` once the event is applied.
/// - `400 Bad Request` for missing headers or a malformed payload.
pub async fn process(
    req: HttpRequest,
    db: web::Data<Database>,
    config: web::Data<Config>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    if let Some(missing) = SVIX_HEADERS
        .iter()
        .find(|name| !req.headers().contains_key(**name))
    {
        warn!("webhook delivery without {} header", missing);
        return Err(ApiError::BadRequest("Missing webhook headers".to_string()));
    }

    let event: Event = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook payload: {}", e)))?;

    let conn = db.lock().await;
    match event.kind.as_str() {
        "user.created" | "user.updated" => {
            let user: ProviderUser = serde_json::from_value(event.data)
                .map_err(|e| ApiError::BadRequest(format!("Invalid user payload: {}", e)))?;
            upsert_user(&conn, &config, &user)?;
        }
        "user.deleted" => {
            let clerk_id = event.data.get("id").and_then(|id| id.as_str()).unwrap_or("");
            let updated = conn.execute(
                "UPDATE users SET is_active = 0, updated_at = ?2 WHERE clerk_id = ?1",
                params![clerk_id, timestamp(Utc::now())],
            )?;
            info!("identity {} deleted, {} account(s) deactivated", clerk_id, updated);
        }
        other => info!("ignoring webhook event '{}'", other),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Webhook processed")))
}

/// Tables whose `user_id`-style column follows an account when it is re-keyed.
const USER_REFERENCES: [(&str, &str); 5] = [
    ("user_bookmarks", "user_id"),
    ("user_submitted_tools", "user_id"),
    ("user_reviews", "user_id"),
    ("tools", "submitted_by"),
    ("tools", "approved_by"),
];

/// A local account matched by a provider delivery.
enum Match {
    /// Already carries this provider id.
    Linked(String),
    /// Self-registered with the same email and never linked.
    Unverified(String),
}

fn find_match(conn: &Connection, clerk_id: &str, email: &str) -> rusqlite::Result<Option<Match>> {
    conn.query_row(
        "SELECT id, 1 FROM users WHERE clerk_id = ?1
         UNION ALL
         SELECT id, 0 FROM users WHERE email = ?2 AND clerk_id IS NULL
         LIMIT 1",
        params![clerk_id, email],
        |row| {
            let id: String = row.get(0)?;
            let linked: bool = row.get(1)?;
            Ok(if linked {
                Match::Linked(id)
            } else {
                Match::Unverified(id)
            })
        },
    )
    .optional()
}

/// Updates the account linked to `user.id`; otherwise adopts a
/// self-registered account with the same email, otherwise creates one.
///
/// `is_active` is only ever set on insert, so a late `user.updated` cannot
/// revive an account a `user.deleted` already deactivated. An adopted
/// account gets a fresh id: the one handed out at self-registration stops
/// resolving once the email is verified by the provider.
fn upsert_user(conn: &Connection, config: &Config, user: &ProviderUser) -> ApiResult<()> {
    if user.id.is_empty() {
        return Err(ApiError::BadRequest("Webhook user has no id".to_string()));
    }
    let email = user
        .primary_email()
        .ok_or_else(|| ApiError::BadRequest("Webhook user has no email address".to_string()))?;
    let username = user.username(&email);
    let role = if config.is_admin_email(&email) {
        UserRole::Admin
    } else {
        UserRole::User
    };
    let now = timestamp(Utc::now());

    match find_match(conn, &user.id, &email)? {
        Some(Match::Linked(id)) => {
            conn.execute(
                "UPDATE users SET email = ?2, username = ?3, first_name = ?4, last_name = ?5,
                     image_url = ?6, updated_at = ?7
                 WHERE id = ?1",
                params![
                    id,
                    email,
                    username,
                    user.first_name,
                    user.last_name,
                    user.image_url,
                    now
                ],
            )
            .map_err(|e| ApiError::unique_violation(e, "Email belongs to another account"))?;
            info!("account {} synced from identity {}", id, user.id);
        }
        Some(Match::Unverified(old_id)) => {
            let id = new_id();
            conn.execute(
                "UPDATE users SET id = ?2, clerk_id = ?3, username = ?4, first_name = ?5,
                     last_name = ?6, image_url = ?7,
                     role = CASE WHEN ?8 = 'admin' THEN 'admin' ELSE role END,
                     updated_at = ?9
                 WHERE id = ?1",
                params![
                    old_id,
                    id,
                    user.id,
                    username,
                    user.first_name,
                    user.last_name,
                    user.image_url,
                    role.as_str(),
                    now
                ],
            )?;
            for (table, column) in USER_REFERENCES {
                conn.execute(
                    &format!("UPDATE {} SET {} = ?2 WHERE {} = ?1", table, column, column),
                    params![old_id, id],
                )?;
            }
            info!("account {} adopted by identity {} as {}", old_id, user.id, id);
        }
        None => {
            conn.execute(
                "INSERT INTO users (id, clerk_id, email, username, first_name, last_name,
                     image_url, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    new_id(),
                    user.id,
                    email,
                    username,
                    user.first_name,
                    user.last_name,
                    user.image_url,
                    role.as_str(),
                    now
                ],
            )
            .map_err(|e| ApiError::unique_violation(e, "Email belongs to another account"))?;
            info!("account created from identity {}", user.id);
        }
    }
    Ok(())
}
