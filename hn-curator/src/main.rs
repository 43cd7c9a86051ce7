use anyhow::Context;
use clap::Parser;
use hn_curator::{
    CuratorConfig, JsonRenderer, PipelineBuilder, RankingKind, Renderer, TextRenderer,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "hn-curator", about = "Fetch, screen and list Hacker News stories")]
struct Args {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identifiers taken from the head of each ranking source
    #[arg(long)]
    items_length: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_seconds: Option<u64>,

    /// Ranking sources to read (repeatable), replacing the configured ones
    #[arg(long = "source", value_enum)]
    sources: Vec<RankingKind>,

    /// Print the digest as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> anyhow::Result<CuratorConfig> {
    let mut config = match &args.config {
        Some(path) => CuratorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CuratorConfig::default(),
    };

    if let Some(items_length) = args.items_length {
        config.items_length = items_length;
    }
    if let Some(timeout_seconds) = args.timeout_seconds {
        config.fetch.timeout_seconds = timeout_seconds;
    }
    if !args.sources.is_empty() {
        config = config.with_ranking_kinds(&args.sources);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    info!(
        "Starting hn-curator with sources: {}",
        config.sources.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    let pipeline = PipelineBuilder::new()
        .with_config(config)
        .build()
        .context("failed to build pipeline")?;

    let digest = match pipeline.run().await {
        Ok(digest) => digest,
        Err(e) => {
            error!("Could not load stories: {}", e);
            return Err(e).context("curation run failed");
        }
    };

    info!(
        "Digest generated at {} from {} identifiers ({} items fetched)",
        digest.generated_at, digest.identifiers_collected, digest.items_fetched
    );

    let stdout = std::io::stdout();
    if args.json {
        JsonRenderer::new(stdout.lock()).render(&digest)?;
    } else {
        let discussion_url = pipeline.config().discussion_url.as_str();
        TextRenderer::new(stdout.lock(), discussion_url).render(&digest)?;
    }

    Ok(())
}
