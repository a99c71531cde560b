use crate::types::Article;
use serde::Serialize;
use std::collections::HashMap;

/// Source and category counts of the articles placed so far.
///
/// Built from the guaranteed set and then frozen: the remaining pool is scored
/// against this snapshot, never against its own placement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DistributionSnapshot {
    source_counts: HashMap<String, usize>,
    category_counts: HashMap<String, usize>,
    source_history: Vec<String>,
    total: usize,
}

impl DistributionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_articles<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Self {
        let mut snapshot = Self::new();
        for article in articles {
            snapshot.record(article);
        }
        snapshot
    }

    pub fn record(&mut self, article: &Article) {
        *self.source_counts.entry(article.source.clone()).or_insert(0) += 1;
        *self.category_counts.entry(article.category.clone()).or_insert(0) += 1;
        self.source_history.push(article.source.clone());
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn source_count(&self, source: &str) -> usize {
        self.source_counts.get(source).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Fraction of recorded articles that came from `source`; 0 when empty.
    pub fn source_share(&self, source: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.source_count(source) as f64 / self.total as f64
    }

    /// Fraction of recorded articles in `category`; 0 when empty.
    pub fn category_share(&self, category: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.category_count(category) as f64 / self.total as f64
    }

    /// The last `n` recorded sources, most recent last.
    pub fn recent_sources(&self, n: usize) -> &[String] {
        let start = self.source_history.len().saturating_sub(n);
        &self.source_history[start..]
    }

    pub fn source_counts(&self) -> &HashMap<String, usize> {
        &self.source_counts
    }

    pub fn category_counts(&self) -> &HashMap<String, usize> {
        &self.category_counts
    }
}
