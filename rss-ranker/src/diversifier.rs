use crate::config::RankingConfig;
use crate::coverage::select_category_coverage;
use crate::distribution::DistributionSnapshot;
use crate::interleave::interleave;
use crate::ranker::{CompositeRanker, ScoringContext};
use crate::stats::FeedStats;
use crate::types::{Article, KnownCategories, Result, ScoreEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered feed plus the optional debug report.
#[derive(Debug, Clone)]
pub struct DiversifiedFeed {
    pub articles: Vec<Article>,
    pub report: Option<DiversityReport>,
}

/// How one ordering was reached. Built only when debug output is requested.
#[derive(Debug, Clone, Serialize)]
pub struct DiversityReport {
    pub evaluated_at: DateTime<Utc>,
    pub guaranteed_count: usize,
    pub remaining_count: usize,
    pub snapshot_sources: HashMap<String, usize>,
    pub snapshot_categories: HashMap<String, usize>,
    /// Remainder scores in final ranked order.
    pub ranked: Vec<ScoreEntry>,
    /// Composition of the leading slice of the output.
    pub leading_stats: FeedStats,
}

/// Orders a pool of fetched articles for display.
///
/// Built once at startup and shared by reference between request handlers.
/// Holds only configuration, so concurrent calls need no coordination.
pub struct FeedDiversifier {
    config: RankingConfig,
    ranker: CompositeRanker,
    categories: Arc<dyn KnownCategories>,
}

impl FeedDiversifier {
    /// Fails when the configuration is invalid, before anything is scored.
    pub fn new(config: RankingConfig, categories: Arc<dyn KnownCategories>) -> Result<Self> {
        let ranker = CompositeRanker::new(&config)?;

        info!(
            recency = config.weights.recency,
            diversity = config.weights.diversity,
            quality = config.weights.quality,
            category = config.weights.category,
            half_life_hours = config.recency_half_life_hours,
            "Feed diversifier ready"
        );

        Ok(Self {
            config,
            ranker,
            categories,
        })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Order `articles` against the current wall clock.
    pub fn diversify(&self, articles: Vec<Article>, debug: bool) -> DiversifiedFeed {
        self.diversify_at(articles, Utc::now(), debug)
    }

    /// Order `articles` with every recency score taken relative to `now`.
    pub fn diversify_at(&self, articles: Vec<Article>, now: DateTime<Utc>, debug: bool) -> DiversifiedFeed {
        if articles.is_empty() {
            return DiversifiedFeed {
                articles: Vec::new(),
                report: None,
            };
        }

        let pool_size = articles.len();
        let categories = self.categories.categories();

        let split = select_category_coverage(
            articles,
            &categories,
            self.config.min_articles_per_category,
            now,
        );
        let snapshot = DistributionSnapshot::from_articles(&split.guaranteed);

        let guaranteed_count = split.guaranteed.len();
        let remaining_count = split.remaining.len();

        let ctx = ScoringContext {
            snapshot: &snapshot,
            category_count: categories.len(),
            now,
        };
        let ranked = self.ranker.rank(split.remaining, &ctx);

        let ranked_entries: Option<Vec<ScoreEntry>> =
            debug.then(|| ranked.iter().map(ScoreEntry::from).collect());

        let feed = interleave(split.guaranteed, ranked);

        info!(
            pool = pool_size,
            guaranteed = guaranteed_count,
            remaining = remaining_count,
            output = feed.len(),
            "Diversified feed"
        );

        let report = ranked_entries.map(|ranked| {
            let report = DiversityReport {
                evaluated_at: now,
                guaranteed_count,
                remaining_count,
                snapshot_sources: snapshot.source_counts().clone(),
                snapshot_categories: snapshot.category_counts().clone(),
                ranked,
                leading_stats: FeedStats::leading(&feed, self.config.debug_sample_size),
            };
            log_report(&report);
            report
        });

        DiversifiedFeed {
            articles: feed,
            report,
        }
    }
}

fn log_report(report: &DiversityReport) {
    let stats = &report.leading_stats;
    debug!(
        sample = stats.total,
        categories = stats.category_count(),
        sources = stats.source_count(),
        top_source = stats.top_source.as_ref().map(|top| top.source.as_str()),
        top_share = stats.top_source.as_ref().map(|top| top.share),
        "Leading slice composition"
    );

    for (position, entry) in report.ranked.iter().enumerate() {
        debug!(
            position,
            id = %entry.id,
            source = %entry.source,
            category = %entry.category,
            score = entry.score,
            recency = entry.breakdown.recency,
            quality = entry.breakdown.quality,
            diversity = entry.breakdown.diversity,
            category_balance = entry.breakdown.category,
            "Ranked article"
        );
    }
}
