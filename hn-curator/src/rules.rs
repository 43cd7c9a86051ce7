use crate::types::{Item, ItemType, RejectionCause, Result};
use regex::{Regex, RegexBuilder};
use url::Url;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Reject(RejectionCause),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// One independent predicate of the classification chain.
pub trait ClassificationRule: Send + Sync {
    fn rule_name(&self) -> &'static str;

    /// Judge a normalized item.
    fn evaluate(&self, item: &Item) -> Verdict;
}

fn hostname(item: &Item) -> Option<String> {
    Url::parse(item.url_or_empty())
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_string()))
}

/// Rejects items whose hostname is on the block-list. Unparsable URLs are rejected too.
pub struct HostRule {
    blocked_hosts: Vec<String>,
}

impl HostRule {
    pub fn new(blocked_hosts: Vec<String>) -> Self {
        Self { blocked_hosts }
    }
}

impl ClassificationRule for HostRule {
    fn rule_name(&self) -> &'static str {
        "host"
    }

    fn evaluate(&self, item: &Item) -> Verdict {
        let host = match hostname(item) {
            Some(host) => host,
            None => {
                return Verdict::Reject(RejectionCause::UnparsableUrl {
                    url: item.url_or_empty().to_string(),
                });
            }
        };

        if self.blocked_hosts.iter().any(|blocked| blocked.eq_ignore_ascii_case(&host)) {
            Verdict::Reject(RejectionCause::BlockedHost { host })
        } else {
            Verdict::Pass
        }
    }
}

/// Rejects items whose title matches a screened pattern, ignoring case.
pub struct KeywordRule {
    patterns: Vec<Regex>,
}

impl KeywordRule {
    /// Compiles every pattern up front; an invalid pattern is a configuration error.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl ClassificationRule for KeywordRule {
    fn rule_name(&self) -> &'static str {
        "keyword"
    }

    fn evaluate(&self, item: &Item) -> Verdict {
        let title = item.title_or_empty();
        match self.patterns.iter().find(|regex| regex.is_match(title)) {
            Some(regex) => Verdict::Reject(RejectionCause::Keyword {
                pattern: regex.as_str().to_string(),
            }),
            None => Verdict::Pass,
        }
    }
}

pub struct TypeRule;

impl ClassificationRule for TypeRule {
    fn rule_name(&self) -> &'static str {
        "type"
    }

    fn evaluate(&self, item: &Item) -> Verdict {
        if item.kind == ItemType::Job {
            Verdict::Reject(RejectionCause::JobPosting)
        } else {
            Verdict::Pass
        }
    }
}

/// Rejects self-posts (items living on the discussion site) with too few comments.
///
/// An item with no comment count at all is let through.
pub struct LowEngagementRule {
    discussion_host: String,
    min_descendants: u32,
}

impl LowEngagementRule {
    pub fn new(discussion_host: impl Into<String>, min_descendants: u32) -> Self {
        Self {
            discussion_host: discussion_host.into(),
            min_descendants,
        }
    }
}

impl ClassificationRule for LowEngagementRule {
    fn rule_name(&self) -> &'static str {
        "low_engagement"
    }

    fn evaluate(&self, item: &Item) -> Verdict {
        let on_discussion_site = hostname(item)
            .map(|host| host.eq_ignore_ascii_case(&self.discussion_host))
            .unwrap_or(false);

        match item.descendants {
            Some(descendants) if on_discussion_site && descendants < self.min_descendants => {
                Verdict::Reject(RejectionCause::LowEngagement {
                    descendants,
                    threshold: self.min_descendants,
                })
            }
            _ => Verdict::Pass,
        }
    }
}

/// Rejects items whose URL contains a screened fragment (domain plus path).
pub struct ScreenedUrlRule {
    fragments: Vec<String>,
}

impl ScreenedUrlRule {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }
}

impl ClassificationRule for ScreenedUrlRule {
    fn rule_name(&self) -> &'static str {
        "screened_url"
    }

    fn evaluate(&self, item: &Item) -> Verdict {
        let url = item.url_or_empty();
        match self.fragments.iter().find(|fragment| url.contains(fragment.as_str())) {
            Some(fragment) => Verdict::Reject(RejectionCause::ScreenedUrl {
                fragment: fragment.clone(),
            }),
            None => Verdict::Pass,
        }
    }
}
