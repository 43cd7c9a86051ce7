pub mod types;
pub mod config;
pub mod traits;
pub mod sources;
pub mod fetcher;
pub mod aggregator;
pub mod normalize;
pub mod rules;
pub mod classifier;
pub mod partition;
pub mod pipeline;
pub mod render;

pub use types::*;
pub use config::CuratorConfig;
pub use traits::ItemApi;
pub use sources::{RankingKind, RankingSource};
pub use fetcher::Fetcher;
pub use aggregator::{Aggregation, IdentifierSet, SourceAggregator};
pub use classifier::Classifier;
pub use partition::Partition;
pub use pipeline::{curate, CurationPipeline, Digest, PipelineBuilder};
pub use render::{DisplayLine, JsonRenderer, Renderer, TextRenderer};
