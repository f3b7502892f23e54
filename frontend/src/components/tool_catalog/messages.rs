use common::model::category::Category;
use common::model::search::{SearchResults, TagCount};
use common::model::tool::{BookmarkState, ReviewOutcome};
use common::responses::ToolPage;

/// Fields of the submission form.
#[derive(Clone, Copy, PartialEq)]
pub enum DraftField {
    Name,
    Category,
    Link,
    Description,
    Tags,
}

#[derive(Clone)]
pub enum Msg {
    LoadCategories,
    CategoriesLoaded(Vec<Category>),
    LoadTrending,
    TrendingLoaded(Vec<TagCount>),
    Reload,
    ToolsLoaded(ToolPage),
    SearchLoaded(SearchResults),
    SetQuery(String),
    RunSearch,
    SearchTag(String),
    ClearSearch,
    SetCategory(String),
    SetSort(String),
    SetPage(u32),
    SetIdentity(String),
    ToggleBookmark(String),
    BookmarkToggled(String, BookmarkState),
    Rate(String, u8),
    Reviewed(String, ReviewOutcome),
    SetDraft(DraftField, String),
    SubmitTool,
    ToolSubmitted(Option<String>),
    SetNewsletterEmail(String),
    Subscribe,
    Subscribed(Option<String>),
    Failed(String),
}
