//! Data hooks: every read goes through a query cache keyed by
//! `[entity, scope, ...params]`, and every successful write drops the cache
//! namespaces it makes stale before the caller refetches.
//!
//! Failures come back as the envelope's `message` so the caller can put it in
//! a toast.

use chrono::Utc;
use common::cache::{Entity, Mutation, QueryCache, QueryKey, Scope};
use common::model::category::Category;
use common::model::search::{SearchResults, TagCount};
use common::model::tool::{BookmarkState, ReviewOutcome};
use common::requests::{CreateToolRequest, ReviewRequest, SubscribeRequest};
use common::responses::{ApiResponse, ToolPage};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;

const USER_HEADER: &str = "X-User-Id";

thread_local! {
    static CACHE: RefCell<QueryCache<Value>> = RefCell::new(QueryCache::new());
    static IDENTITY: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Sets the id (or identity-provider id) sent with every request.
pub fn set_identity(identity: &str) {
    let identity = identity.trim();
    IDENTITY.with(|cell| {
        *cell.borrow_mut() = (!identity.is_empty()).then(|| identity.to_string());
    });
}

/// What a successful write returned.
pub struct Written<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Filters of the catalog listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolFilter {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub sort: String,
}

impl ToolFilter {
    fn key(&self) -> QueryKey {
        QueryKey::new(Entity::Tools, Scope::List)
            .param(self.page)
            .param(self.limit)
            .param(self.category.as_deref().unwrap_or(""))
            .param(&self.sort)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if !self.sort.is_empty() {
            params.push(("sort", self.sort.clone()));
        }
        params
    }
}

pub async fn tools(filter: &ToolFilter) -> Result<ToolPage, String> {
    let params = filter.params();
    query(filter.key(), Request::get("/api/tools").query(params_ref(&params))).await
}

pub async fn categories() -> Result<Vec<Category>, String> {
    query(
        QueryKey::new(Entity::Categories, Scope::List),
        Request::get("/api/categories"),
    )
    .await
}

pub async fn trending_tags() -> Result<Vec<TagCount>, String> {
    query(
        QueryKey::new(Entity::Search, Scope::Trending),
        Request::get("/api/search/trending"),
    )
    .await
}

pub async fn search(text: &str, page: u32, limit: u32) -> Result<SearchResults, String> {
    let key = QueryKey::new(Entity::Search, Scope::List)
        .param(text)
        .param(page)
        .param(limit);
    let params = [
        ("q", text.to_string()),
        ("page", page.to_string()),
        ("limit", limit.to_string()),
    ];
    query(key, Request::get("/api/search").query(params_ref(&params))).await
}

pub async fn submit_tool(tool: &CreateToolRequest) -> Result<Written<Value>, String> {
    mutate(Mutation::SubmitTool, Request::post("/api/tools"), Some(tool)).await
}

pub async fn toggle_bookmark(tool_id: &str) -> Result<Written<BookmarkState>, String> {
    let url = format!("/api/tools/{}/bookmark", tool_id);
    mutate::<(), _>(Mutation::ToggleBookmark, Request::post(&url), None).await
}

pub async fn submit_review(
    tool_id: &str,
    review: &ReviewRequest,
) -> Result<Written<ReviewOutcome>, String> {
    let url = format!("/api/tools/{}/review", tool_id);
    mutate(Mutation::SubmitReview, Request::post(&url), Some(review)).await
}

pub async fn subscribe(request: &SubscribeRequest) -> Result<Written<Value>, String> {
    mutate(
        Mutation::Subscribe,
        Request::post("/api/newsletter/subscribe"),
        Some(request),
    )
    .await
}

fn params_ref<'a>(params: &'a [(&'static str, String)]) -> impl Iterator<Item = (&'a str, &'a str)> {
    params.iter().map(|(name, value)| (*name, value.as_str()))
}

fn with_identity(builder: RequestBuilder) -> RequestBuilder {
    match IDENTITY.with(|cell| cell.borrow().clone()) {
        Some(identity) => builder.header(USER_HEADER, &identity),
        None => builder,
    }
}

/// Serves `key` from the cache while it is fresh, otherwise fetches it and
/// stores the envelope's `data`.
async fn query<T: DeserializeOwned>(key: QueryKey, builder: RequestBuilder) -> Result<T, String> {
    let now = Utc::now();
    if let Some(cached) = CACHE.with(|cache| cache.borrow().get_fresh(&key, now)) {
        if let Ok(value) = serde_json::from_value(cached) {
            return Ok(value);
        }
    }

    let envelope = send(with_identity(builder).build()).await?;
    let data = envelope.data.unwrap_or(Value::Null);
    let value = serde_json::from_value(data.clone()).map_err(|e| {
        gloo_console::error!(format!("unexpected payload: {}", e));
        "Unexpected response from server".to_string()
    })?;
    CACHE.with(|cache| cache.borrow_mut().insert(key, data, Utc::now()));
    Ok(value)
}

async fn mutate<B: Serialize, T: DeserializeOwned>(
    mutation: Mutation,
    builder: RequestBuilder,
    body: Option<&B>,
) -> Result<Written<T>, String> {
    let builder = with_identity(builder);
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    };
    let envelope = send(request).await?;
    CACHE.with(|cache| cache.borrow_mut().apply_mutation(mutation));

    let data = match envelope.data {
        Some(data) => serde_json::from_value(data).ok(),
        None => None,
    };
    Ok(Written {
        data,
        message: envelope.message,
    })
}

async fn send(
    request: Result<Request, gloo_net::Error>,
) -> Result<ApiResponse<Value>, String> {
    let response = request
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| {
            gloo_console::error!(format!("request failed: {}", e));
            "Network error, please try again".to_string()
        })?;

    let status = response.status();
    let envelope: ApiResponse<Value> = response
        .json()
        .await
        .map_err(|_| format!("Request failed with status {}", status))?;
    if envelope.success && response.ok() {
        Ok(envelope)
    } else {
        Err(envelope
            .message
            .unwrap_or_else(|| format!("Request failed with status {}", status)))
    }
}
