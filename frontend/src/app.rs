use crate::components::tool_catalog::ToolCatalog;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="directory-root">
                <ToolCatalog page_size={12} />
            </div>
        }
    }
}
