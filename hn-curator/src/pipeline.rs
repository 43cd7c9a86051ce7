use crate::aggregator::SourceAggregator;
use crate::classifier::Classifier;
use crate::config::CuratorConfig;
use crate::fetcher::Fetcher;
use crate::normalize::normalize_items;
use crate::partition::Partition;
use crate::traits::ItemApi;
use crate::types::{Item, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Result of one complete run.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub partition: Partition,
    pub generated_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub identifiers_collected: usize,
    pub items_fetched: usize,
}

/// Normalize, classify and partition already-fetched items. Pure apart from logging.
pub fn curate(items: Vec<Item>, classifier: &Classifier, discussion_url: &str) -> Partition {
    let normalized = normalize_items(items, discussion_url);
    let results = classifier.classify_all(normalized);
    Partition::from_results(results)
}

/// Aggregation, normalization, classification and partitioning wired together.
pub struct CurationPipeline {
    api: Arc<dyn ItemApi>,
    config: Arc<CuratorConfig>,
    classifier: Arc<Classifier>,
}

impl CurationPipeline {
    pub fn new(
        api: Arc<dyn ItemApi>,
        config: Arc<CuratorConfig>,
        classifier: Arc<Classifier>,
    ) -> Self {
        Self { api, config, classifier }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Run the whole pipeline once. Fails only when a ranking source fails.
    pub async fn run(&self) -> Result<Digest> {
        let start_time = Instant::now();
        info!(
            "Starting curation over {} sources (items_length={})",
            self.config.sources.len(),
            self.config.items_length
        );

        let aggregator = SourceAggregator::new(self.api.clone(), self.config.items_length)
            .with_max_concurrent_fetches(self.config.fetch.max_concurrent_fetches);

        let aggregation = aggregator.aggregate(&self.config.sources).await.map_err(|e| {
            error!("Aggregation failed: {}", e);
            e
        })?;

        let identifiers_collected = aggregation.identifiers.len();
        let items_fetched = aggregation.items.len();
        let partition = curate(aggregation.items, &self.classifier, &self.config.discussion_url);

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Curation finished in {}ms: {} accepted, {} in backup",
            elapsed_ms,
            partition.accepted().len(),
            partition.rejected().len()
        );

        Ok(Digest {
            partition,
            generated_at: Utc::now(),
            elapsed_ms,
            identifiers_collected,
            items_fetched,
        })
    }
}

/// Builds a pipeline from config, defaulting to the HTTP fetcher.
pub struct PipelineBuilder {
    config: CuratorConfig,
    api: Option<Arc<dyn ItemApi>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: CuratorConfig::default(),
            api: None,
        }
    }

    pub fn with_config(mut self, config: CuratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_api(mut self, api: Arc<dyn ItemApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<CurationPipeline> {
        self.config.validate()?;
        let classifier = Classifier::from_config(&self.config)?;

        let api: Arc<dyn ItemApi> = match self.api {
            Some(api) => api,
            None => Arc::new(Fetcher::new(self.config.fetch.clone())?),
        };

        Ok(CurationPipeline::new(api, Arc::new(self.config), Arc::new(classifier)))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
