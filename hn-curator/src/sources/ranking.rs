use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The standard ranked lists published by the Hacker News API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankingKind {
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl RankingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::Top => "top",
            RankingKind::New => "new",
            RankingKind::Best => "best",
            RankingKind::Ask => "ask",
            RankingKind::Show => "show",
            RankingKind::Job => "job",
        }
    }

    /// Path of the list relative to the API base.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            RankingKind::Top => "topstories.json",
            RankingKind::New => "newstories.json",
            RankingKind::Best => "beststories.json",
            RankingKind::Ask => "askstories.json",
            RankingKind::Show => "showstories.json",
            RankingKind::Job => "jobstories.json",
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranking endpoint returning an ordered list of item identifiers, most-ranked first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSource {
    pub name: String,
    pub url: String,
}

impl RankingSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn from_kind(kind: RankingKind, api_base_url: &str) -> Self {
        Self {
            name: kind.as_str().to_string(),
            url: format!("{}/{}", api_base_url.trim_end_matches('/'), kind.endpoint_path()),
        }
    }

    /// Top and new, the pair the curator reads when nothing else is configured.
    pub fn defaults(api_base_url: &str) -> Vec<Self> {
        vec![
            Self::from_kind(RankingKind::Top, api_base_url),
            Self::from_kind(RankingKind::New, api_base_url),
        ]
    }
}
