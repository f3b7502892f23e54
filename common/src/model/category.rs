use crate::model::tool::Tool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grouping label for tools.
///
/// `subcategories` is not stored: it is filled in at read time with the ids
/// of every category whose `parent_category` points here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub featured: bool,
    pub order: i64,
    pub parent_category: Option<String>,
    pub subcategories: Vec<String>,
    /// Approved tools filed under this name the last time it was recounted.
    pub tool_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /api/categories/{slug}`: the category and its approved tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category: Category,
    pub tools: Vec<Tool>,
}
