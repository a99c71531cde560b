use crate::types::{RankingError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Allowed drift of the weight sum from 1.0.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Weights of the four signals in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub recency: f64,
    pub diversity: f64,
    pub quality: f64,
    pub category: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            recency: 0.35,
            diversity: 0.35,
            quality: 0.20,
            category: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.recency + self.diversity + self.quality + self.category
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("recency", self.recency),
            ("diversity", self.diversity),
            ("quality", self.quality),
            ("category", self.category),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RankingError::InvalidWeight { name, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(RankingError::InvalidWeights { sum });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub weights: ScoreWeights,
    /// Decay constant of the recency signal, in hours.
    pub recency_half_life_hours: f64,
    /// How many of the newest articles each category is guaranteed up front.
    pub min_articles_per_category: usize,
    /// Longest same-source run allowed in the ranked remainder before a
    /// different source is pulled forward. Zero turns smoothing off.
    pub max_consecutive_per_source: usize,
    /// Number of leading output articles covered by debug statistics.
    pub debug_sample_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            recency_half_life_hours: 24.0,
            min_articles_per_category: 1,
            max_consecutive_per_source: 2,
            debug_sample_size: 20,
        }
    }
}

impl RankingConfig {
    /// Load the configuration from `RANKER_*` environment variables, using the
    /// defaults for anything unset. The result is validated before returning.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            weights: ScoreWeights {
                recency: parse_f64("RANKER_WEIGHT_RECENCY", defaults.weights.recency)?,
                diversity: parse_f64("RANKER_WEIGHT_DIVERSITY", defaults.weights.diversity)?,
                quality: parse_f64("RANKER_WEIGHT_QUALITY", defaults.weights.quality)?,
                category: parse_f64("RANKER_WEIGHT_CATEGORY", defaults.weights.category)?,
            },
            recency_half_life_hours: parse_f64(
                "RANKER_RECENCY_HALF_LIFE_HOURS",
                defaults.recency_half_life_hours,
            )?,
            min_articles_per_category: parse_usize(
                "RANKER_MIN_ARTICLES_PER_CATEGORY",
                defaults.min_articles_per_category,
            )?,
            max_consecutive_per_source: parse_usize(
                "RANKER_MAX_CONSECUTIVE_PER_SOURCE",
                defaults.max_consecutive_per_source,
            )?,
            debug_sample_size: parse_usize("RANKER_DEBUG_SAMPLE_SIZE", defaults.debug_sample_size)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if !self.recency_half_life_hours.is_finite() || self.recency_half_life_hours <= 0.0 {
            return Err(RankingError::InvalidHalfLife {
                hours: self.recency_half_life_hours,
            });
        }
        Ok(())
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_min_articles_per_category(mut self, min: usize) -> Self {
        self.min_articles_per_category = min;
        self
    }

    pub fn with_max_consecutive_per_source(mut self, max: usize) -> Self {
        self.max_consecutive_per_source = max;
        self
    }
}

fn parse_f64(name: &'static str, default: f64) -> Result<f64> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<f64>().map_err(|error| RankingError::InvalidConfig {
        name,
        reason: error.to_string(),
    })
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<usize>().map_err(|error| RankingError::InvalidConfig {
        name,
        reason: error.to_string(),
    })
}
