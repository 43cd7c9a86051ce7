use crate::sources::RankingSource;
use crate::types::{Item, ItemId, Result};
use async_trait::async_trait;

/// Read access to a ranking API (the live Hacker News API, or a stand-in).
#[async_trait]
pub trait ItemApi: Send + Sync {
    /// Human-readable name for logs
    fn api_name(&self) -> String;

    /// Fetch a ranking list. Failing to fetch or parse it is an error for the whole batch.
    async fn fetch_ranking(&self, source: &RankingSource) -> Result<Vec<ItemId>>;

    /// Fetch one item. Any failure, or a `null` record, yields `None`;
    /// implementations absorb their own errors here.
    async fn fetch_item(&self, id: ItemId) -> Option<Item>;
}
