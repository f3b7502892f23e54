//! Column lists and row mappers shared by the services.

use super::parse_timestamp;
use common::model::category::Category;
use common::model::newsletter::{Interest, Subscriber};
use common::model::tool::{Pricing, Tool, ToolStatus};
use common::model::user::{User, UserRole};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::error::Error;

pub const TOOL_COLUMNS: &str = "id, name, slug, category, tags, company, description, link, \
     image, status, pricing, rating, review_count, view_count, bookmark_count, featured, \
     approved, submitted_by, approved_by, approved_at, created_at, updated_at";

pub const CATEGORY_COLUMNS: &str = "id, name, slug, description, icon, color, featured, \
     sort_order, parent_id, tool_count, created_at, updated_at";

pub const USER_COLUMNS: &str = "id, clerk_id, email, username, first_name, last_name, \
     image_url, role, is_active, last_login, login_count, created_at, updated_at";

pub const SUBSCRIBER_COLUMNS: &str = "id, email, interests, source, is_active, subscribed_at, \
     unsubscribed_at, unsubscribe_reason, created_at, updated_at";

fn conversion_error(column: usize, err: impl Into<Box<dyn Error + Send + Sync>>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, err.into())
}

fn timestamp_at(row: &Row, column: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw, column)
}

fn optional_timestamp_at(
    row: &Row,
    column: usize,
) -> rusqlite::Result<Option<chrono::DateTime<chrono::Utc>>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|raw| parse_timestamp(&raw, column)).transpose()
}

/// Maps a row selected with `TOOL_COLUMNS`.
pub fn tool_from_row(row: &Row) -> rusqlite::Result<Tool> {
    let tags: String = row.get(4)?;
    let status: String = row.get(9)?;
    let pricing: String = row.get(10)?;

    Ok(Tool {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        category: row.get(3)?,
        tags: serde_json::from_str(&tags).map_err(|e| conversion_error(4, e))?,
        company: row.get(5)?,
        description: row.get(6)?,
        link: row.get(7)?,
        image: row.get(8)?,
        status: status.parse::<ToolStatus>().map_err(|e| conversion_error(9, e))?,
        pricing: pricing.parse::<Pricing>().map_err(|e| conversion_error(10, e))?,
        rating: row.get(11)?,
        review_count: row.get(12)?,
        view_count: row.get(13)?,
        bookmark_count: row.get(14)?,
        featured: row.get(15)?,
        approved: row.get(16)?,
        submitted_by: row.get(17)?,
        approved_by: row.get(18)?,
        approved_at: optional_timestamp_at(row, 19)?,
        created_at: timestamp_at(row, 20)?,
        updated_at: timestamp_at(row, 21)?,
    })
}

/// Maps a row selected with `CATEGORY_COLUMNS`. `subcategories` is left empty;
/// see [`load_subcategories`].
pub fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        icon: row.get(4)?,
        color: row.get(5)?,
        featured: row.get(6)?,
        order: row.get(7)?,
        parent_category: row.get(8)?,
        subcategories: Vec::new(),
        tool_count: row.get(9)?,
        created_at: timestamp_at(row, 10)?,
        updated_at: timestamp_at(row, 11)?,
    })
}

pub fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let role: String = row.get(7)?;
    Ok(User {
        id: row.get(0)?,
        clerk_id: row.get(1)?,
        email: row.get(2)?,
        username: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        image_url: row.get(6)?,
        role: UserRole::parse(&role),
        is_active: row.get(8)?,
        last_login: optional_timestamp_at(row, 9)?,
        login_count: row.get(10)?,
        created_at: timestamp_at(row, 11)?,
        updated_at: timestamp_at(row, 12)?,
    })
}

pub fn subscriber_from_row(row: &Row) -> rusqlite::Result<Subscriber> {
    let interests: String = row.get(2)?;
    Ok(Subscriber {
        id: row.get(0)?,
        email: row.get(1)?,
        interests: serde_json::from_str::<Vec<Interest>>(&interests)
            .map_err(|e| conversion_error(2, e))?,
        source: row.get(3)?,
        is_active: row.get(4)?,
        subscribed_at: timestamp_at(row, 5)?,
        unsubscribed_at: optional_timestamp_at(row, 6)?,
        unsubscribe_reason: row.get(7)?,
        created_at: timestamp_at(row, 8)?,
        updated_at: timestamp_at(row, 9)?,
    })
}

pub fn find_tool(conn: &Connection, id: &str) -> rusqlite::Result<Option<Tool>> {
    conn.query_row(
        &format!("SELECT {} FROM tools WHERE id = ?1", TOOL_COLUMNS),
        params![id],
        tool_from_row,
    )
    .optional()
}

/// Runs a `SELECT TOOL_COLUMNS ...` statement and collects every row.
pub fn query_tools<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Tool>> {
    let mut stmt = conn.prepare(sql)?;
    let tools = stmt
        .query_map(params, tool_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tools)
}

pub fn find_category(conn: &Connection, id: &str) -> rusqlite::Result<Option<Category>> {
    let category = conn
        .query_row(
            &format!("SELECT {} FROM categories WHERE id = ?1", CATEGORY_COLUMNS),
            params![id],
            category_from_row,
        )
        .optional()?;
    category.map(|c| load_subcategories(conn, c)).transpose()
}

/// Fills `subcategories` with the ids of the categories parented here.
pub fn load_subcategories(conn: &Connection, mut category: Category) -> rusqlite::Result<Category> {
    let mut stmt =
        conn.prepare("SELECT id FROM categories WHERE parent_id = ?1 ORDER BY sort_order, name")?;
    category.subcategories = stmt
        .query_map(params![category.id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(category)
}

/// Resolves a caller identity: matches either the user id or the identity
/// provider's id.
pub fn find_user_by_subject(conn: &Connection, subject: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM users WHERE id = ?1 OR clerk_id = ?1",
            USER_COLUMNS
        ),
        params![subject],
        user_from_row,
    )
    .optional()
}

/// Serializes a tag list for the `tags` column.
pub fn tags_json(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Trims tags, drops empties and duplicates, keeping first occurrence order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " writing ".to_string(),
            "".to_string(),
            "writing".to_string(),
            "seo".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["writing", "seo"]);
        assert_eq!(tags_json(&normalize_tags(&tags)), r#"["writing","seo"]"#);
    }
}
