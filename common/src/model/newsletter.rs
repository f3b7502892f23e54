use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topics a subscriber can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    NewTools,
    Tutorials,
    IndustryNews,
    Deals,
    Reviews,
}

impl Interest {
    pub const ALL: [Interest; 5] = [
        Interest::NewTools,
        Interest::Tutorials,
        Interest::IndustryNews,
        Interest::Deals,
        Interest::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::NewTools => "new-tools",
            Interest::Tutorials => "tutorials",
            Interest::IndustryNews => "industry-news",
            Interest::Deals => "deals",
            Interest::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::ALL
            .into_iter()
            .find(|interest| interest.as_str() == s)
            .ok_or_else(|| format!("unknown interest '{}'", s))
    }
}

/// A newsletter subscription. Unsubscribing is soft: the row stays and can be
/// reactivated by subscribing again with the same email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub interests: Vec<Interest>,
    pub source: Option<String>,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub unsubscribe_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestCount {
    pub interest: Interest,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    /// Subscriptions created in the trailing 30 days.
    pub recent_subscriptions: i64,
    pub interests: Vec<InterestCount>,
}
