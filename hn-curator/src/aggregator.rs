use crate::sources::RankingSource;
use crate::traits::ItemApi;
use crate::types::{CuratorError, Item, ItemId, Result};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Identifiers from every source, each kept once, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: Vec<ItemId>,
    seen: HashSet<ItemId>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the first `items_length` ids of each list, concatenated in list order.
    pub fn from_rankings(rankings: &[Vec<ItemId>], items_length: usize) -> Self {
        let mut set = Self::new();
        for ranking in rankings {
            for &id in ranking.iter().take(items_length) {
                set.insert(id);
            }
        }
        set
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, id: ItemId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub identifiers: IdentifierSet,
    pub items: Vec<Item>,
}

pub struct SourceAggregator {
    api: Arc<dyn ItemApi>,
    items_length: usize,
    max_concurrent_fetches: Option<usize>,
}

impl SourceAggregator {
    pub fn new(api: Arc<dyn ItemApi>, items_length: usize) -> Self {
        Self {
            api,
            items_length,
            max_concurrent_fetches: None,
        }
    }

    pub fn with_max_concurrent_fetches(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    /// Fetch every source concurrently and merge their heads.
    ///
    /// All sources settle before anything is returned; a single failing source
    /// fails the batch.
    pub async fn collect_identifiers(&self, sources: &[RankingSource]) -> Result<IdentifierSet> {
        if sources.is_empty() {
            return Err(CuratorError::Config("no ranking sources to aggregate".to_string()));
        }

        let results = join_all(sources.iter().map(|source| self.api.fetch_ranking(source))).await;

        let mut rankings = Vec::with_capacity(results.len());
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(ids) => rankings.push(ids),
                Err(e) => {
                    error!("Ranking source {} failed, aborting aggregation: {}", source.name, e);
                    return Err(e);
                }
            }
        }

        let identifiers = IdentifierSet::from_rankings(&rankings, self.items_length);
        info!(
            "Collected {} distinct identifiers from {} sources",
            identifiers.len(),
            sources.len()
        );
        Ok(identifiers)
    }

    /// Fetch items for every identifier, keeping identifier order and dropping
    /// items that could not be fetched.
    pub async fn fetch_items(&self, identifiers: &IdentifierSet) -> Vec<Item> {
        let limit = self
            .max_concurrent_fetches
            .unwrap_or(identifiers.len())
            .max(1);

        // `buffered` yields in input order, so each result lands in its identifier's slot
        let requests = identifiers.iter().map(|&id| self.api.fetch_item(id));
        let fetched: Vec<Option<Item>> = stream::iter(requests)
            .buffered(limit)
            .collect()
            .await;

        let requested = fetched.len();
        let items: Vec<Item> = fetched.into_iter().flatten().collect();
        if items.len() < requested {
            debug!("Dropped {} unavailable items", requested - items.len());
        }
        info!("Fetched {}/{} items via {}", items.len(), requested, self.api.api_name());
        items
    }

    pub async fn aggregate(&self, sources: &[RankingSource]) -> Result<Aggregation> {
        let identifiers = self.collect_identifiers(sources).await?;
        let items = self.fetch_items(&identifiers).await;
        Ok(Aggregation { identifiers, items })
    }
}
