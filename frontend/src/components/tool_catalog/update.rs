//! Message handling for the catalog browser. Fetches run on `spawn_local` and
//! report back through the component link; failures end in `Msg::Failed`,
//! which shows the server's message in a toast.

use common::requests::{ReviewRequest, SubscribeRequest};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ToolFilter};

use super::helpers::{show_toast, split_tags};
use super::messages::{DraftField, Msg};
use super::state::ToolCatalog;

pub fn update(component: &mut ToolCatalog, ctx: &Context<ToolCatalog>, msg: Msg) -> bool {
    let link = ctx.link().clone();
    match msg {
        Msg::LoadCategories => {
            spawn_local(async move {
                match api::categories().await {
                    Ok(categories) => link.send_message(Msg::CategoriesLoaded(categories)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::CategoriesLoaded(categories) => {
            component.categories = categories;
            true
        }
        Msg::LoadTrending => {
            spawn_local(async move {
                match api::trending_tags().await {
                    Ok(tags) => link.send_message(Msg::TrendingLoaded(tags)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::TrendingLoaded(tags) => {
            component.trending = tags;
            true
        }
        Msg::Reload => {
            component.busy = true;
            fetch_page(component, link);
            true
        }
        Msg::ToolsLoaded(page) => {
            component.busy = false;
            component.tools = page.tools;
            component.pagination = Some(page.pagination);
            component.suggestions.clear();
            true
        }
        Msg::SearchLoaded(results) => {
            component.busy = false;
            component.tools = results.tools;
            component.pagination = Some(results.pagination);
            component.suggestions = results.suggestions;
            true
        }
        Msg::SetQuery(query) => {
            component.query = query;
            false
        }
        Msg::RunSearch => {
            let text = component.query.trim().to_string();
            if text.is_empty() {
                show_toast("Type something to search for");
                return false;
            }
            component.active_search = Some(text);
            component.page = 1;
            ctx.link().send_message(Msg::Reload);
            false
        }
        Msg::SearchTag(tag) => {
            component.query = tag;
            ctx.link().send_message(Msg::RunSearch);
            true
        }
        Msg::ClearSearch => {
            component.query.clear();
            component.active_search = None;
            component.page = 1;
            ctx.link().send_message(Msg::Reload);
            true
        }
        Msg::SetCategory(category) => {
            component.category = (!category.is_empty()).then_some(category);
            component.page = 1;
            ctx.link().send_message(Msg::Reload);
            false
        }
        Msg::SetSort(sort) => {
            component.sort = sort;
            component.page = 1;
            ctx.link().send_message(Msg::Reload);
            false
        }
        Msg::SetPage(page) => {
            if page == 0 || page == component.page {
                return false;
            }
            component.page = page;
            ctx.link().send_message(Msg::Reload);
            false
        }
        Msg::SetIdentity(identity) => {
            api::set_identity(&identity);
            component.identity = identity;
            component.bookmarked.clear();
            true
        }
        Msg::ToggleBookmark(tool_id) => {
            if !signed_in(component) {
                return false;
            }
            spawn_local(async move {
                match api::toggle_bookmark(&tool_id).await {
                    Ok(written) => {
                        if let Some(message) = &written.message {
                            show_toast(message);
                        }
                        if let Some(state) = written.data {
                            link.send_message(Msg::BookmarkToggled(tool_id, state));
                        }
                    }
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::BookmarkToggled(tool_id, state) => {
            component.bookmarked.retain(|id| id != &tool_id);
            if state.bookmarked {
                component.bookmarked.push(tool_id.clone());
            }
            if let Some(tool) = component.tools.iter_mut().find(|t| t.id == tool_id) {
                tool.bookmark_count = state.bookmark_count;
            }
            true
        }
        Msg::Rate(tool_id, rating) => {
            if !signed_in(component) {
                return false;
            }
            let review = ReviewRequest {
                rating: Some(rating),
                comment: None,
            };
            spawn_local(async move {
                match api::submit_review(&tool_id, &review).await {
                    Ok(written) => {
                        show_toast(written.message.as_deref().unwrap_or("Review saved"));
                        if let Some(outcome) = written.data {
                            link.send_message(Msg::Reviewed(tool_id, outcome));
                        }
                    }
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::Reviewed(tool_id, outcome) => {
            if let Some(tool) = component.tools.iter_mut().find(|t| t.id == tool_id) {
                tool.rating = outcome.rating;
                tool.review_count = outcome.review_count;
            }
            true
        }
        Msg::SetDraft(field, value) => {
            match field {
                DraftField::Name => component.draft.name = value,
                DraftField::Category => component.draft.category = value,
                DraftField::Link => component.draft.link = value,
                DraftField::Description => component.draft.description = value,
                DraftField::Tags => component.draft_tags = value,
            }
            false
        }
        Msg::SubmitTool => {
            let mut draft = component.draft.clone();
            draft.tags = split_tags(&component.draft_tags);
            spawn_local(async move {
                match api::submit_tool(&draft).await {
                    Ok(written) => link.send_message(Msg::ToolSubmitted(written.message)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::ToolSubmitted(message) => {
            show_toast(message.as_deref().unwrap_or("Tool submitted for review"));
            component.draft = Default::default();
            component.draft_tags.clear();
            true
        }
        Msg::SetNewsletterEmail(email) => {
            component.newsletter_email = email;
            false
        }
        Msg::Subscribe => {
            let request = SubscribeRequest {
                email: component.newsletter_email.trim().to_string(),
                interests: Vec::new(),
                source: Some("catalog".to_string()),
            };
            spawn_local(async move {
                match api::subscribe(&request).await {
                    Ok(written) => link.send_message(Msg::Subscribed(written.message)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            false
        }
        Msg::Subscribed(message) => {
            show_toast(message.as_deref().unwrap_or("Subscribed"));
            component.newsletter_email.clear();
            true
        }
        Msg::Failed(message) => {
            component.busy = false;
            show_toast(&message);
            true
        }
    }
}

fn signed_in(component: &ToolCatalog) -> bool {
    if component.identity.trim().is_empty() {
        show_toast("Enter your user id first");
        return false;
    }
    true
}

/// Loads the current page of either the active search or the listing.
fn fetch_page(component: &ToolCatalog, link: yew::html::Scope<ToolCatalog>) {
    let page = component.page;
    let limit = component.page_size;
    match component.active_search.clone() {
        Some(text) => spawn_local(async move {
            match api::search(&text, page, limit).await {
                Ok(results) => link.send_message(Msg::SearchLoaded(results)),
                Err(message) => link.send_message(Msg::Failed(message)),
            }
        }),
        None => {
            let filter = ToolFilter {
                page,
                limit,
                category: component.category.clone(),
                sort: component.sort.clone(),
            };
            spawn_local(async move {
                match api::tools(&filter).await {
                    Ok(tools) => link.send_message(Msg::ToolsLoaded(tools)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
        }
    }
}
