use serde::{Deserialize, Serialize};

// Core data model shared with renderers lives in the interfaces crate
pub use interfaces::defs::{ClassificationResult, Item, ItemId, ItemType, RejectionCause};

pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub api_base_url: String,
    pub user_agent: String,
    /// Per-request timeout. A hung item fetch would otherwise stall the whole join.
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    /// Upper bound on in-flight item requests. `None` fetches every identifier at once.
    pub max_concurrent_fetches: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: "hn-curator/0.1".to_string(),
            timeout_seconds: 10,
            max_redirects: 5,
            max_concurrent_fetches: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ranking source {source_name} returned HTTP {status}")]
    SourceUnavailable { source_name: String, status: u16 },

    #[error("Ranking source {source_name} is not a list of identifiers: {message}")]
    SourceParse { source_name: String, message: String },

    #[error("Item {id} returned HTTP {status}")]
    ItemUnavailable { id: ItemId, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
