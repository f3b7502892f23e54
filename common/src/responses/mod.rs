//! The JSON envelope wrapped around every API response, and pagination
//! metadata shared by the list endpoints.

use crate::model::newsletter::Subscriber;
use crate::model::tool::Tool;
use serde::{Deserialize, Serialize};

/// `{success, data?, message?, errors?}`.
///
/// The client renders `message` in a toast; `errors` carries per-field
/// validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Page metadata. The navigation flags are only emitted by the catalog
/// listing; search responses omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev_page: Option<bool>,
}

impl Pagination {
    /// `total_pages` is `ceil(total_items / limit)`, so an empty result has
    /// zero pages.
    pub fn new(page: u32, limit: u32, total_items: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_items.div_ceil(u64::from(limit)) as u32;
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page: None,
            has_prev_page: None,
        }
    }

    pub fn with_navigation(mut self) -> Self {
        self.has_next_page = Some(self.current_page < self.total_pages);
        self.has_prev_page = Some(self.current_page > 1);
        self
    }

    /// Row offset of the first item on `current_page`.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.items_per_page)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPage {
    pub tools: Vec<Tool>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberPage {
    pub subscribers: Vec<Subscriber>,
    pub pagination: Pagination,
}
