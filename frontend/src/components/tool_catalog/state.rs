//! Runtime state of the catalog browser.

use common::model::category::Category;
use common::model::search::TagCount;
use common::model::tool::Tool;
use common::requests::CreateToolRequest;
use common::responses::Pagination;

pub struct ToolCatalog {
    pub tools: Vec<Tool>,
    pub pagination: Option<Pagination>,
    pub categories: Vec<Category>,
    pub trending: Vec<TagCount>,
    /// Suggestions returned with the last search.
    pub suggestions: Vec<String>,

    /// Text in the search box.
    pub query: String,
    /// The search currently shown, `None` while browsing the listing.
    pub active_search: Option<String>,
    pub category: Option<String>,
    pub sort: String,
    pub page: u32,
    pub page_size: u32,

    /// Value sent as the caller identity on every request.
    pub identity: String,
    /// Ids bookmarked during this session, keyed by the last toggle result.
    pub bookmarked: Vec<String>,

    pub draft: CreateToolRequest,
    /// Comma-separated tags of the draft, split on submit.
    pub draft_tags: String,
    pub newsletter_email: String,

    pub busy: bool,
    /// Guards the one-time initial fetch.
    pub loaded: bool,
}

impl ToolCatalog {
    pub fn new(page_size: u32) -> Self {
        Self {
            tools: Vec::new(),
            pagination: None,
            categories: Vec::new(),
            trending: Vec::new(),
            suggestions: Vec::new(),
            query: String::new(),
            active_search: None,
            category: None,
            sort: String::new(),
            page: 1,
            page_size: page_size.clamp(1, 50),
            identity: String::new(),
            bookmarked: Vec::new(),
            draft: CreateToolRequest::default(),
            draft_tags: String::new(),
            newsletter_email: String::new(),
            busy: false,
            loaded: false,
        }
    }

    pub fn is_bookmarked(&self, tool_id: &str) -> bool {
        self.bookmarked.iter().any(|id| id == tool_id)
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.as_ref().map_or(0, |p| p.total_pages)
    }
}
