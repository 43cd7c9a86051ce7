//! Curator configuration.
//!
//! Loaded once at startup (defaults, optionally overlaid by a TOML file) and
//! shared read-only afterwards. Every field is optional in the file:
//!
//! ```toml
//! items_length = 30
//! min_descendants = 5
//! blocked_hosts = ["www.youtube.com"]
//! screened_keywords = ["launch hn", "\\[pdf\\]"]
//!
//! [[sources]]
//! name = "top"
//! url = "https://hacker-news.firebaseio.com/v0/topstories.json"
//!
//! [fetch]
//! timeout_seconds = 10
//! ```

use crate::sources::{RankingKind, RankingSource};
use crate::types::{CuratorError, FetchConfig, Result, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use url::Url;

pub const DEFAULT_ITEMS_LENGTH: usize = 30;
pub const DEFAULT_MIN_DESCENDANTS: u32 = 5;
pub const DEFAULT_DISCUSSION_URL: &str = "https://news.ycombinator.com/item";

pub const DEFAULT_BLOCKED_HOSTS: &[&str] = &[
    "www.acm.org",
    "aeon.co",
    "americanaffairsjournal.org",
    "aws.amazon.com",
    "www.atlasobscura.com",
    "www.anandtech.com",
    "www.arxiv.org",
    "www.bloomberg.com",
    "www.cnn.com",
    "www.economist.com",
    "www.frontiersin.org",
    "www.ft.com",
    "developers.googleblog.com",
    "sec.gov",
    "leimao.github.io",
    "www.lrb.co.uk",
    "medicalxpress.com",
    "www.medrxiv.org",
    "www.nautil.us",
    "www.newscientist.com",
    "www.newyorker.com",
    "www.nih.gov",
    "www.nytimes.com",
    "paulgraham.com",
    "www.pnas.org",
    "www.pingcap.com",
    "www.preprints.org",
    "publicdomainreview.org",
    "www.quantamagazine.org",
    "www.sciencemag.org",
    "www.scmp.com",
    "seths.blog",
    "www.theatlantic.com",
    "www.vice.com",
    "www.washingtonpost.com",
    "en.wikipedia.org",
    "www.wsj.com",
    "youtu.be",
    "www.youtube.com",
];

/// Regular expressions, matched case-insensitively against titles.
pub const DEFAULT_SCREENED_KEYWORDS: &[&str] = &[
    "coin",
    "dao",
    "blockchain",
    r"\[video\]",
    r"\[pdf\]",
    "Launch HN",
    "covid",
];

pub const DEFAULT_SCREENED_URL_FRAGMENTS: &[&str] = &["www.nature.com/articles/s", "pubcard.net"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// How many identifiers to take from the head of each ranking source.
    pub items_length: usize,
    pub sources: Vec<RankingSource>,
    pub blocked_hosts: Vec<String>,
    pub screened_keywords: Vec<String>,
    pub screened_url_fragments: Vec<String>,
    /// Self-posts with fewer comments than this are rejected.
    pub min_descendants: u32,
    /// Discussion page base; items without a link point at `{discussion_url}?id={id}`.
    pub discussion_url: String,
    pub fetch: FetchConfig,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            items_length: DEFAULT_ITEMS_LENGTH,
            sources: RankingSource::defaults(DEFAULT_API_BASE_URL),
            blocked_hosts: to_strings(DEFAULT_BLOCKED_HOSTS),
            screened_keywords: to_strings(DEFAULT_SCREENED_KEYWORDS),
            screened_url_fragments: to_strings(DEFAULT_SCREENED_URL_FRAGMENTS),
            min_descendants: DEFAULT_MIN_DESCENDANTS,
            discussion_url: DEFAULT_DISCUSSION_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl CuratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content.parse()?;
        let sources_given = table.contains_key("sources");
        let mut config: CuratorConfig = table.try_into()?;
        if !sources_given {
            config.sources = RankingSource::defaults(&config.fetch.api_base_url);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Replace the configured sources with standard lists under the configured API base.
    pub fn with_ranking_kinds(mut self, kinds: &[RankingKind]) -> Self {
        self.sources = kinds
            .iter()
            .map(|kind| RankingSource::from_kind(*kind, &self.fetch.api_base_url))
            .collect();
        self
    }

    /// Host of the discussion site, e.g. `news.ycombinator.com`.
    pub fn discussion_host(&self) -> Result<String> {
        let url = Url::parse(&self.discussion_url)?;
        url.host_str()
            .map(|h| h.to_string())
            .ok_or_else(|| {
                CuratorError::Config(format!("Discussion URL has no host: {}", self.discussion_url))
            })
    }

    pub fn validate(&self) -> Result<()> {
        if self.items_length == 0 {
            return Err(CuratorError::Config("items_length must be at least 1".to_string()));
        }
        if self.sources.is_empty() {
            return Err(CuratorError::Config(
                "at least one ranking source is required".to_string(),
            ));
        }
        for source in &self.sources {
            Url::parse(&source.url)?;
        }
        if self.fetch.timeout_seconds == 0 {
            return Err(CuratorError::Config("fetch.timeout_seconds must be positive".to_string()));
        }
        if self.fetch.max_concurrent_fetches == Some(0) {
            return Err(CuratorError::Config(
                "fetch.max_concurrent_fetches must be positive".to_string(),
            ));
        }
        // An empty fragment or pattern would screen every item
        if self.screened_url_fragments.iter().any(|f| f.is_empty()) {
            return Err(CuratorError::Config(
                "screened_url_fragments may not contain empty entries".to_string(),
            ));
        }
        if self.screened_keywords.iter().any(|k| k.is_empty()) {
            return Err(CuratorError::Config(
                "screened_keywords may not contain empty entries".to_string(),
            ));
        }
        Url::parse(&self.fetch.api_base_url)?;
        self.discussion_host()?;
        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
