use serde::{Deserialize, Serialize};
// Use the interfaces crate for the article contract
pub use interfaces::defs::{Article, CategorySpec, KnownCategories};
pub use interfaces::StaticCategories;

/// Per-signal scores behind a composite score. Each value is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub recency: f64,
    pub quality: f64,
    pub diversity: f64,
    pub category: f64,
}

/// An article from the remaining set together with its ranking score.
/// Lives only for the duration of one ranking call.
#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredArticle {
    pub fn id(&self) -> &str {
        &self.article.id
    }

    pub fn source(&self) -> &str {
        &self.article.source
    }
}

/// Flattened view of a scored article for debug output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub source: String,
    pub category: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl From<&ScoredArticle> for ScoreEntry {
    fn from(scored: &ScoredArticle) -> Self {
        Self {
            id: scored.article.id.clone(),
            source: scored.article.source.clone(),
            category: scored.article.category.clone(),
            score: scored.score,
            breakdown: scored.breakdown,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Score weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("Score weight {name} must be a finite, non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Recency half-life must be positive, got {hours} hours")]
    InvalidHalfLife { hours: f64 },

    #[error("Invalid value for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, RankingError>;
