use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ToolCatalogProps {
    /// Tools per page of the listing and of search results.
    #[prop_or(12)]
    pub page_size: u32,
}
