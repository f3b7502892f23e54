//! Catalog browser: approved tools with category and sort filters, free-text
//! search with trending tags, bookmarks and star ratings, a submission form
//! and a newsletter signup.
//!
//! All reads and writes go through `crate::api`, so repeat visits within a
//! stale window are served from the query cache and every write refreshes the
//! lists it affects.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ToolCatalogProps;
pub use state::ToolCatalog;

impl Component for ToolCatalog {
    type Message = Msg;
    type Properties = ToolCatalogProps;

    fn create(ctx: &Context<Self>) -> Self {
        ToolCatalog::new(ctx.props().page_size)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link()
                .send_message_batch(vec![Msg::LoadCategories, Msg::LoadTrending, Msg::Reload]);
        }
    }
}
