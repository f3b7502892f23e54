use crate::model::tool::Tool;
use crate::responses::Pagination;
use serde::{Deserialize, Serialize};

/// `GET /api/search` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub tools: Vec<Tool>,
    pub suggestions: Vec<String>,
    pub pagination: Pagination,
    pub search_query: String,
}

/// A tag and the number of approved tools carrying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}
