use crate::sources::RankingSource;
use crate::traits::ItemApi;
use crate::types::{CuratorError, FetchConfig, Item, ItemId, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP client for the ranking and item endpoints.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}/item/{}.json", self.config.api_base_url.trim_end_matches('/'), id)
    }

    async fn get_text(&self, url: &str) -> Result<(reqwest::StatusCode, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn try_fetch_item(&self, id: ItemId) -> Result<Option<Item>> {
        let url = self.item_url(id);
        let (status, body) = self.get_text(&url).await?;

        if !status.is_success() {
            return Err(CuratorError::ItemUnavailable {
                id,
                status: status.as_u16(),
            });
        }

        // The API answers `null` for identifiers it has no record for
        let item: Option<Item> = serde_json::from_str(&body)?;
        Ok(item)
    }
}

#[async_trait]
impl ItemApi for Fetcher {
    fn api_name(&self) -> String {
        format!("HTTP API ({})", self.config.api_base_url)
    }

    async fn fetch_ranking(&self, source: &RankingSource) -> Result<Vec<ItemId>> {
        let start_time = Instant::now();
        debug!("Fetching ranking source: {} ({})", source.name, source.url);

        let (status, body) = self.get_text(&source.url).await?;

        if !status.is_success() {
            return Err(CuratorError::SourceUnavailable {
                source_name: source.name.clone(),
                status: status.as_u16(),
            });
        }

        let ids: Vec<ItemId> = serde_json::from_str(&body).map_err(|e| CuratorError::SourceParse {
            source_name: source.name.clone(),
            message: e.to_string(),
        })?;

        info!(
            "Fetched {} identifiers from {} in {}ms",
            ids.len(),
            source.name,
            start_time.elapsed().as_millis()
        );
        Ok(ids)
    }

    async fn fetch_item(&self, id: ItemId) -> Option<Item> {
        match self.try_fetch_item(id).await {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                debug!("Item {} has no record, skipping", id);
                None
            }
            Err(e) => {
                warn!("Failed to fetch item {}: {}", id, e);
                None
            }
        }
    }
}
