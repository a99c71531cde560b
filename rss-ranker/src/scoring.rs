//! Per-article ranking signals. Every scorer returns a value in [0, 1] and
//! reads nothing but its arguments.

use crate::distribution::DistributionSnapshot;
use crate::types::Article;
use chrono::{DateTime, Utc};

/// Share above which a source starts to be pushed down.
const SOURCE_SHARE_MIDPOINT: f64 = 0.3;
const SOURCE_SHARE_STEEPNESS: f64 = 10.0;
/// How many trailing placements count towards the repeat penalty.
const REPEAT_WINDOW: usize = 2;
const REPEAT_DECAY: f64 = 0.6;
const CATEGORY_BALANCE_GAIN: f64 = 4.0;

/// Exponential freshness decay against a fixed reference instant.
///
/// Articles dated in the future (clock skew) clamp to 1.
pub fn recency_score(article: &Article, now: DateTime<Utc>, half_life_hours: f64) -> f64 {
    let published_at = article.effective_published_at(now);
    let hours = now.signed_duration_since(published_at).num_milliseconds() as f64 / 3_600_000.0;
    (-hours / half_life_hours).exp().clamp(0.0, 1.0)
}

/// Additive heuristic over image, body length, author and title length.
pub fn quality_score(article: &Article) -> f64 {
    let mut score = 0.0;

    if article.has_image() {
        score += 0.3;
    }

    let content_length = article.content_length();
    if content_length > 200 {
        score += 0.4;
    } else if content_length > 100 {
        score += 0.2;
    }

    if article.has_author() {
        score += 0.2;
    }

    if (40..=120).contains(&article.title_length()) {
        score += 0.1;
    }

    f64::min(score, 1.0)
}

/// Sigmoid penalty for sources that already dominate the reference distribution.
pub fn over_representation_penalty(source_share: f64) -> f64 {
    1.0 / (1.0 + (SOURCE_SHARE_STEEPNESS * (source_share - SOURCE_SHARE_MIDPOINT)).exp())
}

/// `0.6^k` where k is how many of the last two placed sources match.
pub fn consecutive_repeat_penalty(source: &str, distribution: &DistributionSnapshot) -> f64 {
    let repeats = distribution
        .recent_sources(REPEAT_WINDOW)
        .iter()
        .filter(|placed| placed.as_str() == source)
        .count();
    REPEAT_DECAY.powi(repeats as i32)
}

pub fn source_diversity_score(article: &Article, distribution: &DistributionSnapshot) -> f64 {
    let share = distribution.source_share(&article.source);
    let score = over_representation_penalty(share) * consecutive_repeat_penalty(&article.source, distribution);
    score.clamp(0.0, 1.0)
}

/// Bonus for categories below their equal share, 0.5 when exactly on it.
pub fn category_balance_score(
    article: &Article,
    distribution: &DistributionSnapshot,
    category_count: usize,
) -> f64 {
    if category_count == 0 {
        return 0.5;
    }
    let expected_share = 1.0 / category_count as f64;
    let actual_share = distribution.category_share(&article.category);
    (0.5 + CATEGORY_BALANCE_GAIN * (expected_share - actual_share)).clamp(0.0, 1.0)
}
