use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release/commercial status shown on a tool card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolStatus {
    #[default]
    Free,
    Freemium,
    Paid,
    Released,
    Upcoming,
    Beta,
}

impl ToolStatus {
    pub const ALL: [ToolStatus; 6] = [
        ToolStatus::Free,
        ToolStatus::Freemium,
        ToolStatus::Paid,
        ToolStatus::Released,
        ToolStatus::Upcoming,
        ToolStatus::Beta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Free => "Free",
            ToolStatus::Freemium => "Freemium",
            ToolStatus::Paid => "Paid",
            ToolStatus::Released => "Released",
            ToolStatus::Upcoming => "Upcoming",
            ToolStatus::Beta => "Beta",
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown tool status '{}'", s))
    }
}

/// Pricing model. `ActiveDeal` is spelled `"Active deal"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pricing {
    #[default]
    Free,
    Freemium,
    Paid,
    #[serde(rename = "Active deal")]
    ActiveDeal,
}

impl Pricing {
    pub const ALL: [Pricing; 4] = [
        Pricing::Free,
        Pricing::Freemium,
        Pricing::Paid,
        Pricing::ActiveDeal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pricing::Free => "Free",
            Pricing::Freemium => "Freemium",
            Pricing::Paid => "Paid",
            Pricing::ActiveDeal => "Active deal",
        }
    }
}

impl fmt::Display for Pricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pricing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pricing::ALL
            .into_iter()
            .find(|pricing| pricing.as_str() == s)
            .ok_or_else(|| format!("unknown pricing '{}'", s))
    }
}

/// A catalogued AI product.
///
/// `category` holds the category *name*, not its id: membership is decided by
/// string equality, and renaming a category rewrites this field on every tool
/// that referenced the old name.
///
/// The counters (`rating`, `review_count`, `view_count`, `bookmark_count`) are
/// maintained in place by the interaction endpoints and are never recomputed
/// from the per-user lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub company: Option<String>,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    pub status: ToolStatus,
    pub pricing: Pricing,
    pub rating: f64,
    pub review_count: i64,
    pub view_count: i64,
    pub bookmark_count: i64,
    pub featured: bool,
    /// Unapproved tools never appear in public listings or search.
    pub approved: bool,
    pub submitted_by: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of toggling a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkState {
    pub bookmarked: bool,
    pub bookmark_count: i64,
}

/// Tool counters after a review was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub rating: f64,
    pub review_count: i64,
}

/// One row of `GET /api/tools/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryToolCount {
    pub category: String,
    pub count: i64,
    pub average_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_active_deal_wire_name() {
        let json = serde_json::to_string(&Pricing::ActiveDeal).unwrap();
        assert_eq!(json, "\"Active deal\"");
        assert_eq!("Active deal".parse::<Pricing>().unwrap(), Pricing::ActiveDeal);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!("Beta".parse::<ToolStatus>().unwrap(), ToolStatus::Beta);
        assert!("beta".parse::<ToolStatus>().is_err());
    }
}
