pub mod types;
pub mod config;
pub mod coverage;
pub mod distribution;
pub mod scoring;
pub mod ranker;
pub mod interleave;
pub mod stats;
pub mod diversifier;

pub use types::*;
pub use config::{RankingConfig, ScoreWeights};
pub use coverage::{select_category_coverage, CoverageSplit};
pub use distribution::DistributionSnapshot;
pub use ranker::{smooth_source_runs, CompositeRanker, ScoringContext};
pub use interleave::interleave;
pub use stats::{FeedStats, TopSource};
pub use diversifier::{DiversifiedFeed, DiversityReport, FeedDiversifier};
