use serde::{Deserialize, Serialize};
use std::fmt;

pub type ItemId = u64;

/// Kind of entry as reported by the item endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Story,
    Job,
    Comment,
    Poll,
    Pollopt,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One content entry. Absent fields in the upstream record stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ItemType,
    #[serde(default)]
    pub descendants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl Item {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            title: None,
            url: None,
            kind: ItemType::Story,
            descendants: None,
            by: None,
            score: None,
            time: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_kind(mut self, kind: ItemType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_descendants(mut self, descendants: u32) -> Self {
        self.descendants = Some(descendants);
        self
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn url_or_empty(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

/// Why an item ended up on the backup list. Each variant belongs to exactly one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionCause {
    UnparsableUrl { url: String },
    BlockedHost { host: String },
    Keyword { pattern: String },
    JobPosting,
    LowEngagement { descendants: u32, threshold: u32 },
    ScreenedUrl { fragment: String },
}

impl RejectionCause {
    /// Name of the rule that produced this cause.
    pub fn rule_name(&self) -> &'static str {
        match self {
            RejectionCause::UnparsableUrl { .. } => "unparsable_url",
            RejectionCause::BlockedHost { .. } => "host",
            RejectionCause::Keyword { .. } => "keyword",
            RejectionCause::JobPosting => "type",
            RejectionCause::LowEngagement { .. } => "low_engagement",
            RejectionCause::ScreenedUrl { .. } => "screened_url",
        }
    }
}

impl fmt::Display for RejectionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionCause::UnparsableUrl { url } => write!(f, "unparsable URL: {}", url),
            RejectionCause::BlockedHost { host } => write!(f, "blocked host: {}", host),
            RejectionCause::Keyword { pattern } => write!(f, "screened keyword: {}", pattern),
            RejectionCause::JobPosting => write!(f, "job posting"),
            RejectionCause::LowEngagement { descendants, threshold } => {
                write!(f, "low engagement: {} comments (< {})", descendants, threshold)
            }
            RejectionCause::ScreenedUrl { fragment } => write!(f, "screened URL: {}", fragment),
        }
    }
}

/// Verdict for one item. `cause` is only set for rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub item: Item,
    pub cause: Option<RejectionCause>,
}

impl ClassificationResult {
    pub fn accepted(item: Item) -> Self {
        Self { item, cause: None }
    }

    pub fn rejected(item: Item, cause: RejectionCause) -> Self {
        Self { item, cause: Some(cause) }
    }

    pub fn is_accepted(&self) -> bool {
        self.cause.is_none()
    }
}
