//! # Tool Maintenance (admin)
//!
//! `PUT /api/tools/{id}` applies a partial update; `PUT /api/tools/{id}/approve`
//! is the one-field shortcut used by the moderation queue.
//!
//! Approval stamps follow the `approved` flag: a transition to approved
//! records the acting admin and the time, a transition back clears both.
//! Renaming a tool regenerates its slug.

use super::checked_id;
use crate::auth::AdminUser;
use crate::db::rows::{find_tool, normalize_tags, tags_json};
use crate::db::{timestamp, Assignments, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::slugify;
use common::model::tool::Tool;
use common::requests::UpdateToolRequest;
use common::responses::ApiResponse;
use log::info;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use validator::Validate;

/// Actix web handler for `PUT /api/tools/{id}`.
///
/// # Arguments
/// * `admin` - The acting administrator, recorded as approver on approval.
/// * `id` - The tool id, extracted from the URL path.
/// * `payload` - The fields to change; absent fields are left untouched.
///
/// # Returns
/// - `200 OK` with the updated tool.
/// - `400 Bad Request` on validation failure or a name already in use.
/// - `404 Not Found` when no tool has that id.
pub async fn process(
    db: web::Data<Database>,
    admin: AdminUser,
    id: web::Path<String>,
    payload: web::Json<UpdateToolRequest>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let payload = payload.into_inner().trimmed();
    payload.validate()?;
    let tool = update_tool(&db, id, &payload, &admin.0.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(tool, "Tool updated successfully")))
}

/// Actix web handler for `PUT /api/tools/{id}/approve`.
///
/// # Returns
/// - `200 OK` with the approved tool.
/// - `404 Not Found` when no tool has that id.
pub async fn approve(
    db: web::Data<Database>,
    admin: AdminUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let payload = UpdateToolRequest {
        approved: Some(true),
        ..Default::default()
    };
    let tool = update_tool(&db, id, &payload, &admin.0.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(tool, "Tool approved successfully")))
}

pub async fn update_tool(
    db: &Database,
    id: &str,
    payload: &UpdateToolRequest,
    admin_id: &str,
) -> ApiResult<Tool> {
    let conn = db.lock().await;
    let current =
        find_tool(&conn, id)?.ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))?;

    let now = Utc::now();
    let mut update = Assignments::default();

    if let Some(name) = payload.name.as_deref().map(str::trim) {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(ApiError::field("name", "Name must contain letters or digits"));
        }
        update.set_text("name", Some(name));
        update.set_text("slug", Some(&slug));
    }
    if let Some(category) = payload.category.as_deref() {
        update.set_text("category", Some(category.trim()));
    }
    if let Some(description) = payload.description.as_deref() {
        update.set_text("description", Some(description.trim()));
    }
    if let Some(link) = payload.link.as_deref() {
        update.set_text("link", Some(link));
    }
    if let Some(tags) = &payload.tags {
        update.set_text("tags", Some(&tags_json(&normalize_tags(tags))));
    }
    if let Some(company) = payload.company.as_deref() {
        update.set_text("company", Some(company));
    }
    if let Some(image) = payload.image.as_deref() {
        update.set_text("image", Some(image));
    }
    if let Some(status) = payload.status {
        update.set_text("status", Some(status.as_str()));
    }
    if let Some(pricing) = payload.pricing {
        update.set_text("pricing", Some(pricing.as_str()));
    }
    if let Some(featured) = payload.featured {
        update.set("featured", Value::Integer(featured.into()));
    }
    match payload.approved {
        Some(true) if !current.approved => {
            update.set("approved", Value::Integer(1));
            update.set_text("approved_by", Some(admin_id));
            update.set_text("approved_at", Some(&timestamp(now)));
        }
        Some(false) if current.approved => {
            update.set("approved", Value::Integer(0));
            update.set_text("approved_by", None);
            update.set_text("approved_at", None);
        }
        _ => {}
    }
    update.set_text("updated_at", Some(&timestamp(now)));

    let (sql, args) = update.into_statement("tools", id);
    conn.execute(&sql, params_from_iter(args))
        .map_err(|e| ApiError::unique_violation(e, "A tool with this name already exists"))?;

    if payload.approved == Some(true) && !current.approved {
        info!("tool {} approved by {}", id, admin_id);
    } else {
        info!("tool {} updated by {}", id, admin_id);
    }

    find_tool(&conn, id)?.ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))
}
