use anyhow::Context;
use clap::Parser;
use rss_ranker::{Article, CategorySpec, FeedDiversifier, FeedStats, RankingConfig, StaticCategories};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};

/// Order a pool of fetched articles into a diversified feed.
#[derive(Debug, Parser)]
#[command(name = "rss-ranker", version)]
struct Args {
    /// JSON array of articles
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the ordered articles; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON array of {slug, name}; the reference categories when omitted
    #[arg(short, long)]
    categories: Option<PathBuf>,

    /// Log per-article score breakdowns
    #[arg(long)]
    debug: bool,

    /// Size of the leading slice summarised in the logs
    #[arg(long)]
    top: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = RankingConfig::from_env().context("invalid ranking configuration")?;

    let categories = match &args.categories {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read categories from {}", path.display()))?;
            let specs: Vec<CategorySpec> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse categories in {}", path.display()))?;
            StaticCategories::new(specs)
        }
        None => StaticCategories::reference(),
    };
    if categories.is_empty() {
        warn!("No categories configured, nothing will be guaranteed a slot");
    }

    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("failed to read articles from {}", args.input.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse articles in {}", args.input.display()))?;

    info!("Loaded {} articles from {}", articles.len(), args.input.display());

    let top = args.top.unwrap_or(config.debug_sample_size);
    let diversifier = FeedDiversifier::new(config, Arc::new(categories))?;
    let feed = diversifier.diversify(articles, args.debug);

    let stats = FeedStats::leading(&feed.articles, top);
    info!(
        "Top {}: {} categories, {} sources",
        stats.total,
        stats.category_count(),
        stats.source_count()
    );
    if let Some(top_source) = &stats.top_source {
        info!(
            "  most frequent source: {} ({} articles, {:.0}%)",
            top_source.source,
            top_source.count,
            top_source.share * 100.0
        );
    }

    let rendered = serde_json::to_string_pretty(&feed.articles)?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} articles to {}", feed.articles.len(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
