//! Matching and ranking for the free-text search.
//!
//! The query is always a literal: regex metacharacters typed by the user are
//! escaped before the pattern is compiled, so `c++` or `(beta)` search for
//! exactly that text.

use common::model::tool::Tool;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

const MAX_NAME_SUGGESTIONS: usize = 5;
const MAX_TAG_SUGGESTIONS: usize = 5;
const MAX_SUGGESTIONS: usize = 10;

/// A compiled, case-insensitive substring matcher for one query.
pub struct Matcher {
    pattern: Regex,
    lowered: String,
}

impl Matcher {
    pub fn new(query: &str) -> Result<Self, regex::Error> {
        let query = query.trim();
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern,
            lowered: query.to_lowercase(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Name, description, any tag, company or category contains the query.
    pub fn matches_tool(&self, tool: &Tool) -> bool {
        self.is_match(&tool.name)
            || self.is_match(&tool.description)
            || tool.tags.iter().any(|tag| self.is_match(tag))
            || tool.company.as_deref().is_some_and(|c| self.is_match(c))
            || self.is_match(&tool.category)
    }

    fn is_exact_name(&self, tool: &Tool) -> bool {
        tool.name.to_lowercase() == self.lowered
    }

    /// Exact name match first, then rating, then views (both descending).
    pub fn rank(&self, a: &Tool, b: &Tool) -> Ordering {
        self.is_exact_name(b)
            .cmp(&self.is_exact_name(a))
            .then_with(|| b.rating.total_cmp(&a.rating))
            .then_with(|| b.view_count.cmp(&a.view_count))
    }
}

/// Keeps tools carrying at least one of `wanted`; an empty filter keeps all.
pub fn has_any_tag(tool: &Tool, wanted: &[String]) -> bool {
    wanted.is_empty() || tool.tags.iter().any(|tag| wanted.contains(tag))
}

/// Filters `tools` (approved, in store order) and sorts them by relevance.
/// The sort is stable, so ties keep store order.
pub fn search(tools: Vec<Tool>, matcher: &Matcher, tags: &[String]) -> Vec<Tool> {
    let mut hits: Vec<Tool> = tools
        .into_iter()
        .filter(|tool| has_any_tag(tool, tags) && matcher.matches_tool(tool))
        .collect();
    hits.sort_by(|a, b| matcher.rank(a, b));
    hits
}

/// Up to five matching names, best rated first, followed by up to five
/// matching tags. Duplicates are dropped and the list is capped at ten.
pub fn suggestions(tools: &[Tool], matcher: &Matcher) -> Vec<String> {
    let mut by_rating: Vec<&Tool> = tools.iter().collect();
    by_rating.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let names = by_rating
        .iter()
        .filter(|tool| matcher.is_match(&tool.name))
        .map(|tool| tool.name.clone())
        .take(MAX_NAME_SUGGESTIONS);

    let mut tags: Vec<String> = Vec::new();
    for tag in by_rating.iter().flat_map(|tool| tool.tags.iter()) {
        if tags.len() == MAX_TAG_SUGGESTIONS {
            break;
        }
        if matcher.is_match(tag) && !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    let mut out: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    for candidate in names.chain(tags) {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out.truncate(MAX_SUGGESTIONS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::tool::{Pricing, ToolStatus};

    fn tool(name: &str, tags: &[&str], rating: f64, views: i64) -> Tool {
        Tool {
            id: name.to_lowercase(),
            name: name.to_string(),
            slug: common::model::slugify(name),
            category: "Writing".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            company: None,
            description: "An assistant".to_string(),
            link: "https://example.com".to_string(),
            image: None,
            status: ToolStatus::Free,
            pricing: Pricing::Free,
            rating,
            review_count: 0,
            view_count: views,
            bookmark_count: 0,
            featured: false,
            approved: true,
            submitted_by: None,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = Matcher::new("c++").unwrap();
        assert!(matcher.is_match("Learn C++ fast"));
        assert!(!matcher.is_match("Learn C fast"));

        let matcher = Matcher::new(".*").unwrap();
        assert!(!matcher.is_match("anything"));
    }

    #[test]
    fn test_exact_name_ranks_first_then_rating_then_views() {
        let matcher = Matcher::new("foo").unwrap();
        let tools = vec![
            tool("Foobar", &[], 5.0, 0),
            tool("Foo", &[], 1.0, 0),
            tool("Foomatic", &[], 5.0, 9),
        ];
        let names: Vec<String> = search(tools, &matcher, &[])
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Foo", "Foomatic", "Foobar"]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let matcher = Matcher::new("bot").unwrap();
        let tools = vec![tool("Bot A", &[], 3.0, 1), tool("Bot B", &[], 3.0, 1)];
        let names: Vec<String> = search(tools, &matcher, &[])
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Bot A", "Bot B"]);
    }

    #[test]
    fn test_tag_filter_is_anded_with_text() {
        let matcher = Matcher::new("assistant").unwrap();
        let tools = vec![
            tool("Scribe", &["writing"], 0.0, 0),
            tool("Painter", &["images"], 0.0, 0),
        ];
        let hits = search(tools, &matcher, &["images".to_string()]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Painter");
    }

    #[test]
    fn test_suggestions_dedupe_and_cap() {
        let matcher = Matcher::new("ai").unwrap();
        let tools: Vec<Tool> = (0..8)
            .map(|i| tool(&format!("AI Tool {}", i), &["ai", "ai-writing"], i as f64, 0))
            .collect();
        let out = suggestions(&tools, &matcher);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], "AI Tool 7");
        assert_eq!(&out[5..], &["ai".to_string(), "ai-writing".to_string()]);
    }
}
