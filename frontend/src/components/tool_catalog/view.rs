//! Markup of the catalog browser: toolbar, search, tool cards, pager and the
//! two side forms.

use common::model::tool::Tool;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::stars;
use super::messages::{DraftField, Msg};
use super::state::ToolCatalog;

const SORTS: [(&str, &str); 6] = [
    ("", "Featured"),
    ("newest", "Newest"),
    ("oldest", "Oldest"),
    ("rating", "Top rated"),
    ("popular", "Most viewed"),
    ("name", "Name"),
];

pub fn view(component: &ToolCatalog, ctx: &Context<ToolCatalog>) -> Html {
    let link = ctx.link();
    html! {
        <div class="catalog-root">
            { build_toolbar(component, link) }
            { build_search(component, link) }
            <div class="catalog-body">
                <main class="catalog-list">
                    if component.busy {
                        <div class="catalog-loading">{ "Loading…" }</div>
                    }
                    if component.tools.is_empty() && !component.busy {
                        <p class="catalog-empty">{ "No tools found." }</p>
                    }
                    { for component.tools.iter().map(|tool| build_card(component, link, tool)) }
                    { build_pager(component, link) }
                </main>
                <aside class="catalog-side">
                    { build_submit_form(component, link) }
                    { build_newsletter(component, link) }
                </aside>
            </div>
        </div>
    }
}

fn build_toolbar(component: &ToolCatalog, link: &Scope<ToolCatalog>) -> Html {
    let on_identity = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetIdentity(input.value())
    });
    let on_category = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetCategory(select.value())
    });
    let on_sort = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetSort(select.value())
    });
    let browsing = component.active_search.is_none();

    html! {
        <div class="catalog-toolbar">
            <input
                class="identity"
                placeholder="User id"
                value={component.identity.clone()}
                onchange={on_identity}
            />
            <select onchange={on_category} disabled={!browsing}>
                <option value="" selected={component.category.is_none()}>{ "All categories" }</option>
                { for component.categories.iter().map(|category| {
                    let selected = component.category.as_deref() == Some(category.name.as_str());
                    html! {
                        <option value={category.name.clone()} selected={selected}>
                            { format!("{} ({})", category.name, category.tool_count) }
                        </option>
                    }
                }) }
            </select>
            <select onchange={on_sort} disabled={!browsing}>
                { for SORTS.iter().map(|(value, label)| html! {
                    <option value={*value} selected={component.sort == *value}>{ *label }</option>
                }) }
            </select>
        </div>
    }
}

fn build_search(component: &ToolCatalog, link: &Scope<ToolCatalog>) -> Html {
    let on_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetQuery(input.value())
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::RunSearch
    });

    html! {
        <div class="catalog-search">
            <form onsubmit={on_submit}>
                <input
                    type="search"
                    placeholder="Search tools, tags, companies"
                    value={component.query.clone()}
                    oninput={on_input}
                />
                <button type="submit">{ "Search" }</button>
                if component.active_search.is_some() {
                    <button type="button" onclick={link.callback(|_| Msg::ClearSearch)}>
                        { "Clear" }
                    </button>
                }
            </form>
            <div class="tag-row">
                if component.suggestions.is_empty() {
                    { chips(link, component.trending.iter().map(|t| t.tag.clone()).collect()) }
                } else {
                    { chips(link, component.suggestions.clone()) }
                }
            </div>
        </div>
    }
}

fn chips(link: &Scope<ToolCatalog>, tags: Vec<String>) -> Html {
    html! {
        <>
        { for tags.into_iter().map(|tag| {
            let label = tag.clone();
            html! {
                <button class="chip" onclick={link.callback(move |_| Msg::SearchTag(tag.clone()))}>
                    { label }
                </button>
            }
        }) }
        </>
    }
}

fn build_card(component: &ToolCatalog, link: &Scope<ToolCatalog>, tool: &Tool) -> Html {
    let id = tool.id.clone();
    let on_bookmark = link.callback(move |_| Msg::ToggleBookmark(id.clone()));
    let bookmark_label = if component.is_bookmarked(&tool.id) {
        "Bookmarked"
    } else {
        "Bookmark"
    };

    html! {
        <article class="tool-card" key={tool.id.clone()}>
            <header>
                <a href={tool.link.clone()} target="_blank" rel="noopener">{ tool.name.clone() }</a>
                if tool.featured {
                    <span class="badge">{ "Featured" }</span>
                }
                <span class="pricing">{ tool.pricing.as_str() }</span>
            </header>
            <p class="category">{ tool.category.clone() }</p>
            <p>{ tool.description.clone() }</p>
            <div class="tag-row">
                { for tool.tags.iter().map(|tag| html! { <span class="tag">{ tag.clone() }</span> }) }
            </div>
            <footer>
                <span class="rating" title={format!("{:.1}", tool.rating)}>
                    { stars(tool.rating) }{ format!(" ({})", tool.review_count) }
                </span>
                <span class="views">{ format!("{} views", tool.view_count) }</span>
                <button onclick={on_bookmark}>
                    { format!("{} · {}", bookmark_label, tool.bookmark_count) }
                </button>
                <span class="rate">
                    { for (1..=5u8).map(|rating| {
                        let id = tool.id.clone();
                        html! {
                            <button
                                class="star"
                                title={format!("Rate {}", rating)}
                                onclick={link.callback(move |_| Msg::Rate(id.clone(), rating))}
                            >
                                { rating.to_string() }
                            </button>
                        }
                    }) }
                </span>
            </footer>
        </article>
    }
}

fn build_pager(component: &ToolCatalog, link: &Scope<ToolCatalog>) -> Html {
    let total = component.total_pages();
    if total <= 1 {
        return html! {};
    }
    let page = component.page;
    html! {
        <nav class="pager">
            <button
                disabled={page <= 1}
                onclick={link.callback(move |_| Msg::SetPage(page - 1))}
            >
                { "Previous" }
            </button>
            <span>{ format!("Page {} of {}", page, total) }</span>
            <button
                disabled={page >= total}
                onclick={link.callback(move |_| Msg::SetPage(page + 1))}
            >
                { "Next" }
            </button>
        </nav>
    }
}

fn draft_input(link: &Scope<ToolCatalog>, field: DraftField, placeholder: &str, value: &str) -> Html {
    let on_input = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetDraft(field, input.value())
    });
    html! {
        <input placeholder={placeholder.to_string()} value={value.to_string()} oninput={on_input} />
    }
}

fn build_submit_form(component: &ToolCatalog, link: &Scope<ToolCatalog>) -> Html {
    let draft = &component.draft;
    let on_description = link.callback(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::SetDraft(DraftField::Description, area.value())
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitTool
    });

    html! {
        <form class="submit-tool" onsubmit={on_submit}>
            <h3>{ "Submit a tool" }</h3>
            { draft_input(link, DraftField::Name, "Name", &draft.name) }
            { draft_input(link, DraftField::Category, "Category", &draft.category) }
            { draft_input(link, DraftField::Link, "https://", &draft.link) }
            { draft_input(link, DraftField::Tags, "Tags, comma separated", &component.draft_tags) }
            <textarea
                placeholder="What does it do?"
                value={draft.description.clone()}
                oninput={on_description}
            />
            <button type="submit">{ "Submit" }</button>
        </form>
    }
}

fn build_newsletter(component: &ToolCatalog, link: &Scope<ToolCatalog>) -> Html {
    let on_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetNewsletterEmail(input.value())
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Subscribe
    });

    html! {
        <form class="newsletter" onsubmit={on_submit}>
            <h3>{ "Weekly digest" }</h3>
            <input
                type="email"
                placeholder="you@example.com"
                value={component.newsletter_email.clone()}
                oninput={on_input}
            />
            <button type="submit">{ "Subscribe" }</button>
        </form>
    }
}
