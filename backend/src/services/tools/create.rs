use crate::auth::OptionalUser;
use crate::db::rows::{find_tool, normalize_tags, tags_json};
use crate::db::{new_id, timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::slugify;
use common::model::tool::Tool;
use common::requests::CreateToolRequest;
use common::responses::ApiResponse;
use log::info;
use rusqlite::params;
use validator::Validate;

/// Actix web handler for `POST /api/tools`: stores a submission for review.
///
/// The tool is never approved on creation. An identified caller is recorded
/// as `submittedBy` and the tool is added to their submitted list.
///
/// # Arguments
/// * `caller` - The submitter, when the request carries an identity.
/// * `payload` - The tool fields. Surrounding whitespace is stripped before
///   the length rules apply.
///
/// # Returns
/// - `201 Created` with the pending tool.
/// - `400 Bad Request` on validation failure or a name already in use.
pub async fn process(
    db: web::Data<Database>,
    caller: OptionalUser,
    payload: web::Json<CreateToolRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner().trimmed();
    payload.validate()?;
    let submitter = caller.0.map(|user| user.id);
    let tool = create_tool(&db, &payload, submitter.as_deref()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        tool,
        "Tool submitted successfully and is pending approval",
    )))
}

pub async fn create_tool(
    db: &Database,
    payload: &CreateToolRequest,
    submitted_by: Option<&str>,
) -> ApiResult<Tool> {
    let name = payload.name.trim();
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ApiError::field("name", "Name must contain letters or digits"));
    }

    let id = new_id();
    let now = timestamp(Utc::now());
    let conn = db.lock().await;
    conn.execute(
        "INSERT INTO tools (id, name, slug, category, tags, company, description, link, image,
            status, pricing, approved, submitted_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?13, ?13)",
        params![
            id,
            name,
            slug,
            payload.category.trim(),
            tags_json(&normalize_tags(&payload.tags)),
            payload.company,
            payload.description.trim(),
            payload.link,
            payload.image,
            payload.status.unwrap_or_default().as_str(),
            payload.pricing.unwrap_or_default().as_str(),
            submitted_by,
            now,
        ],
    )
    .map_err(|e| ApiError::unique_violation(e, "A tool with this name already exists"))?;

    if let Some(user_id) = submitted_by {
        conn.execute(
            "INSERT OR IGNORE INTO user_submitted_tools (user_id, tool_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![user_id, id, now],
        )?;
    }
    info!("tool '{}' submitted ({})", name, id);

    find_tool(&conn, &id)?.ok_or_else(|| ApiError::Internal(format!("tool {} vanished", id)))
}
