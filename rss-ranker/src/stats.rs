use crate::types::Article;
use serde::Serialize;
use std::collections::HashMap;

/// The most frequent source in a slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSource {
    pub source: String,
    pub count: usize,
    /// Fraction of the slice, in [0, 1].
    pub share: f64,
}

/// Composition of a slice of the feed, for logging only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedStats {
    pub total: usize,
    pub by_category: HashMap<String, usize>,
    pub by_source: HashMap<String, usize>,
    pub top_source: Option<TopSource>,
}

impl FeedStats {
    pub fn from_articles(articles: &[Article]) -> Self {
        let mut by_category: HashMap<String, usize> = HashMap::new();
        let mut by_source: HashMap<String, usize> = HashMap::new();

        for article in articles {
            *by_category.entry(article.category.clone()).or_insert(0) += 1;
            *by_source.entry(article.source.clone()).or_insert(0) += 1;
        }

        // Ties go to the alphabetically first source so the report is stable.
        let top_source = by_source
            .iter()
            .max_by(|(a_source, a_count), (b_source, b_count)| {
                a_count.cmp(b_count).then_with(|| b_source.cmp(a_source))
            })
            .map(|(source, &count)| TopSource {
                source: source.clone(),
                count,
                share: count as f64 / articles.len() as f64,
            });

        Self {
            total: articles.len(),
            by_category,
            by_source,
            top_source,
        }
    }

    /// Statistics over the first `n` articles.
    pub fn leading(articles: &[Article], n: usize) -> Self {
        Self::from_articles(&articles[..articles.len().min(n)])
    }

    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }

    pub fn source_count(&self) -> usize {
        self.by_source.len()
    }
}
