use super::checked_id;
use crate::auth::AdminUser;
use crate::db::rows::find_category;
use crate::db::{new_id, timestamp, Assignments, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::category::Category;
use common::model::slugify;
use common::requests::{CreateCategoryRequest, UpdateCategoryRequest};
use common::responses::ApiResponse;
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashSet;
use validator::Validate;

const DUPLICATE: &str = "A category with this name or slug already exists";

/// An explicit slug is normalized the same way a derived one is.
fn resolve_slug(explicit: Option<&str>, name: &str) -> ApiResult<String> {
    let slug = slugify(explicit.unwrap_or(name));
    if slug.is_empty() {
        return Err(ApiError::field("slug", "Slug must contain letters or digits"));
    }
    Ok(slug)
}

fn ensure_parent_exists(conn: &Connection, parent: &str) -> ApiResult<()> {
    if !crate::db::is_object_id(parent) || find_category(conn, parent)?.is_none() {
        return Err(ApiError::BadRequest("Parent category not found".to_string()));
    }
    Ok(())
}

/// Walks up from `parent` and fails if the chain reaches `id`. Stops at the
/// first ancestor already seen, so a pre-existing loop cannot spin forever.
fn ensure_no_cycle(conn: &Connection, id: &str, parent: &str) -> ApiResult<()> {
    let mut seen = HashSet::new();
    let mut current = Some(parent.to_string());
    while let Some(ancestor) = current {
        if ancestor == id {
            return Err(ApiError::BadRequest(
                "Category hierarchy cannot contain cycles".to_string(),
            ));
        }
        if !seen.insert(ancestor.clone()) {
            break;
        }
        current = conn
            .query_row(
                "SELECT parent_id FROM categories WHERE id = ?1",
                params![ancestor],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();
    }
    Ok(())
}

/// Actix web handler for `POST /api/categories` (admin).
///
/// # Arguments
/// * `admin` - The acting administrator.
/// * `payload` - Name plus optional slug, presentation fields and parent.
///
/// # Returns
/// - `201 Created` with the stored category.
/// - `400 Bad Request` on validation failure, an unknown parent, or a name or
///   slug that is already taken.
pub async fn create(
    db: web::Data<Database>,
    admin: AdminUser,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner().trimmed();
    payload.validate()?;
    let category = create_category(&db, &payload).await?;
    info!("category '{}' created by {}", category.name, admin.0.id);
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        category,
        "Category created successfully",
    )))
}

pub async fn create_category(db: &Database, payload: &CreateCategoryRequest) -> ApiResult<Category> {
    let name = payload.name.trim();
    let slug = resolve_slug(payload.slug.as_deref(), name)?;
    let parent = payload.parent_category.as_deref().filter(|p| !p.is_empty());

    let conn = db.lock().await;
    if let Some(parent) = parent {
        ensure_parent_exists(&conn, parent)?;
    }

    let id = new_id();
    let now = timestamp(Utc::now());
    conn.execute(
        "INSERT INTO categories (id, name, slug, description, icon, color, featured, sort_order,
            parent_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            id,
            name,
            slug,
            payload.description,
            payload.icon,
            payload.color,
            payload.featured.unwrap_or(false),
            payload.order.unwrap_or(0),
            parent,
            now,
        ],
    )
    .map_err(|e| ApiError::unique_violation(e, DUPLICATE))?;

    find_category(&conn, &id)?.ok_or_else(|| ApiError::Internal(format!("category {} vanished", id)))
}

/// Actix web handler for `PUT /api/categories/{id}` (admin).
///
/// # Arguments
/// * `admin` - The acting administrator.
/// * `id` - The category id, extracted from the URL path.
/// * `payload` - The fields to change; absent fields are left untouched.
///
/// # Returns
/// - `200 OK` with the updated category.
/// - `400 Bad Request` on validation failure, a duplicate, an unknown parent
///   or a parent that would close a loop.
/// - `404 Not Found` when no category has that id.
pub async fn update(
    db: web::Data<Database>,
    admin: AdminUser,
    id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let id = checked_id(&id)?;
    let payload = payload.into_inner().trimmed();
    payload.validate()?;
    let category = update_category(&db, id, &payload).await?;
    info!("category {} updated by {}", id, admin.0.id);
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        category,
        "Category updated successfully",
    )))
}

/// Applies a partial update. When the name changes, every tool filed under
/// the old name is moved to the new one, and the slug follows the name
/// unless one is given explicitly. An empty `parentCategory` detaches it.
pub async fn update_category(
    db: &Database,
    id: &str,
    payload: &UpdateCategoryRequest,
) -> ApiResult<Category> {
    let conn = db.lock().await;
    let current = find_category(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let mut update = Assignments::default();
    let renamed_to = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| *name != current.name);

    if let Some(name) = renamed_to {
        update.set_text("name", Some(name));
    }
    match (payload.slug.as_deref(), renamed_to) {
        (Some(slug), _) => update.set_text("slug", Some(&resolve_slug(Some(slug), "")?)),
        (None, Some(name)) => update.set_text("slug", Some(&resolve_slug(None, name)?)),
        (None, None) => {}
    }
    if let Some(description) = payload.description.as_deref() {
        update.set_text("description", Some(description));
    }
    if let Some(icon) = payload.icon.as_deref() {
        update.set_text("icon", Some(icon));
    }
    if let Some(color) = payload.color.as_deref() {
        update.set_text("color", Some(color));
    }
    if let Some(featured) = payload.featured {
        update.set("featured", Value::Integer(featured.into()));
    }
    if let Some(order) = payload.order {
        update.set("sort_order", Value::Integer(order));
    }
    match payload.parent_category.as_deref() {
        Some("") => update.set_text("parent_id", None),
        Some(parent) if parent == id => {
            return Err(ApiError::BadRequest(
                "A category cannot be its own parent".to_string(),
            ));
        }
        Some(parent) => {
            ensure_parent_exists(&conn, parent)?;
            ensure_no_cycle(&conn, id, parent)?;
            update.set_text("parent_id", Some(parent));
        }
        None => {}
    }
    update.set_text("updated_at", Some(&timestamp(Utc::now())));

    let (sql, args) = update.into_statement("categories", id);
    conn.execute(&sql, params_from_iter(args))
        .map_err(|e| ApiError::unique_violation(e, DUPLICATE))?;

    if let Some(name) = renamed_to {
        let moved = conn.execute(
            "UPDATE tools SET category = ?1 WHERE category = ?2",
            params![name, current.name],
        )?;
        info!(
            "category '{}' renamed to '{}', {} tools moved",
            current.name, name, moved
        );
    }

    find_category(&conn, id)?.ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
}
