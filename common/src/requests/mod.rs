//! Request payloads and query strings accepted by the API.
//!
//! Bodies use `#[serde(default)]` so a missing field reaches validation as an
//! empty value and is reported per field instead of failing deserialization.

use crate::model::analytics::AnalyticsPeriod;
use crate::model::newsletter::Interest;
use crate::model::tool::{Pricing, ToolStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_option(value: &mut Option<String>) {
    if let Some(value) = value {
        trim_in_place(value);
    }
}

/// Body of `POST /api/tools`. There is no `approved` field: submissions are
/// always stored unapproved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateToolRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    pub category: String,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: String,
    #[validate(url(message = "Link must be a valid URL"))]
    pub link: String,
    #[validate(length(max = 10, message = "At most 10 tags are allowed"))]
    pub tags: Vec<String>,
    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    pub company: Option<String>,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
    pub status: Option<ToolStatus>,
    pub pricing: Option<Pricing>,
}

impl CreateToolRequest {
    /// Strips surrounding whitespace from the free-text fields, so length
    /// rules apply to what is stored.
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.description);
        self
    }
}

/// Body of `PUT /api/tools/{id}` (admin). Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateToolRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    pub category: Option<String>,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: Option<String>,
    #[validate(url(message = "Link must be a valid URL"))]
    pub link: Option<String>,
    #[validate(length(max = 10, message = "At most 10 tags are allowed"))]
    pub tags: Option<Vec<String>>,
    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    pub company: Option<String>,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
    pub status: Option<ToolStatus>,
    pub pricing: Option<Pricing>,
    pub featured: Option<bool>,
    pub approved: Option<bool>,
}

impl UpdateToolRequest {
    pub fn trimmed(mut self) -> Self {
        trim_option(&mut self.name);
        trim_option(&mut self.category);
        trim_option(&mut self.description);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReviewRequest {
    #[validate(
        required(message = "Rating is required"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    pub rating: Option<u8>,
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

/// Sort modes of the catalog listing. Unknown values fall back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolSort {
    Newest,
    Oldest,
    Rating,
    Popular,
    Name,
    /// Featured first, then best rated, then newest.
    #[default]
    Default,
}

impl ToolSort {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("newest") => ToolSort::Newest,
            Some("oldest") => ToolSort::Oldest,
            Some("rating") => ToolSort::Rating,
            Some("popular") => ToolSort::Popular,
            Some("name") => ToolSort::Name,
            _ => ToolSort::Default,
        }
    }
}

/// Query string of `GET /api/tools`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ToolListQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ToolStatus>,
    pub sort: Option<String>,
}

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(
        required(message = "Search query is required"),
        length(min = 1, max = 100, message = "Search query must be between 1 and 100 characters")
    )]
    pub q: Option<String>,
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<u32>,
    pub category: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
}

impl SearchQuery {
    /// The `tags` parameter split on commas, trimmed, empties dropped.
    pub fn tag_filter(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SuggestionQuery {
    #[validate(
        required(message = "Search query is required"),
        length(min = 1, max = 100, message = "Search query must be between 1 and 100 characters")
    )]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<AnalyticsPeriod>,
}

/// Body of `POST /api/analytics/track`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackRequest {
    #[validate(length(min = 1, max = 50, message = "Event is required"))]
    pub event: String,
    pub tool_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 60, message = "Slug must be between 1 and 60 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,
    #[validate(length(max = 20, message = "Color must be at most 20 characters"))]
    pub color: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i64>,
    pub parent_category: Option<String>,
}

impl CreateCategoryRequest {
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_option(&mut self.slug);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 60, message = "Slug must be between 1 and 60 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,
    #[validate(length(max = 20, message = "Color must be at most 20 characters"))]
    pub color: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i64>,
    pub parent_category: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn trimmed(mut self) -> Self {
        trim_option(&mut self.name);
        trim_option(&mut self.slug);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SubscribeRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    pub interests: Vec<Interest>,
    #[validate(length(max = 50, message = "Source must be at most 50 characters"))]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UnsubscribeRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubscriberListQuery {
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    pub active: Option<bool>,
}

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"))]
    pub username: String,
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    /// Assigned by the identity provider; a non-empty value is rejected.
    pub clerk_id: Option<String>,
}
