#![allow(dead_code)]

// Shared helpers for the integration tests
use async_trait::async_trait;
use hn_curator::{CuratorError, Item, ItemApi, ItemId, RankingSource, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const TEST_BASE: &str = "http://api.test/v0";

pub fn source(name: &str) -> RankingSource {
    RankingSource::new(name, format!("{}/{}stories.json", TEST_BASE, name))
}

/// In-memory API. Counts every item request so tests can check nothing is fetched twice.
#[derive(Default)]
pub struct MockApi {
    rankings: HashMap<String, Vec<ItemId>>,
    broken_sources: HashSet<String>,
    items: HashMap<ItemId, Item>,
    item_calls: Mutex<HashMap<ItemId, usize>>,
    ranking_calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranking(mut self, name: &str, ids: Vec<ItemId>) -> Self {
        self.rankings.insert(name.to_string(), ids);
        self
    }

    /// A source whose body is not a list of identifiers.
    pub fn with_broken_source(mut self, name: &str) -> Self {
        self.broken_sources.insert(name.to_string());
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        for item in items {
            self.items.insert(item.id, item);
        }
        self
    }

    pub fn item_calls(&self, id: ItemId) -> usize {
        self.item_calls.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    pub fn total_item_calls(&self) -> usize {
        self.item_calls.lock().unwrap().values().sum()
    }

    pub fn ranking_calls(&self) -> Vec<String> {
        self.ranking_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemApi for MockApi {
    fn api_name(&self) -> String {
        "mock API".to_string()
    }

    async fn fetch_ranking(&self, source: &RankingSource) -> Result<Vec<ItemId>> {
        self.ranking_calls.lock().unwrap().push(source.name.clone());
        if self.broken_sources.contains(&source.name) {
            return Err(CuratorError::SourceParse {
                source_name: source.name.clone(),
                message: "expected a sequence".to_string(),
            });
        }
        self.rankings
            .get(&source.name)
            .cloned()
            .ok_or_else(|| CuratorError::SourceUnavailable {
                source_name: source.name.clone(),
                status: 404,
            })
    }

    async fn fetch_item(&self, id: ItemId) -> Option<Item> {
        *self.item_calls.lock().unwrap().entry(id).or_insert(0) += 1;
        self.items.get(&id).cloned()
    }
}

pub fn story(id: ItemId, title: &str, url: &str, descendants: u32) -> Item {
    Item::new(id)
        .with_title(title)
        .with_url(url)
        .with_descendants(descendants)
}
