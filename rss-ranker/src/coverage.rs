use crate::types::{Article, CategorySpec};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Result of the category coverage pass.
#[derive(Debug, Clone, Default)]
pub struct CoverageSplit {
    /// Newest articles of each category, in category-list order.
    pub guaranteed: Vec<Article>,
    /// Everything else, in original pool order.
    pub remaining: Vec<Article>,
}

/// Guarantee every known category a slot for its `min_per_category` newest
/// articles. Ties on publish time keep pool order. Categories without
/// articles are skipped.
pub fn select_category_coverage(
    pool: Vec<Article>,
    categories: &[CategorySpec],
    min_per_category: usize,
    now: DateTime<Utc>,
) -> CoverageSplit {
    let mut picked: Vec<usize> = Vec::new();
    let mut seen_slugs: HashSet<&str> = HashSet::new();

    for category in categories {
        if !seen_slugs.insert(category.slug.as_str()) {
            continue;
        }

        let mut in_category: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, article)| article.category == category.slug)
            .map(|(index, _)| index)
            .collect();

        // sort_by_key is stable, so equal timestamps stay in pool order
        in_category.sort_by_key(|&index| std::cmp::Reverse(pool[index].effective_published_at(now)));
        in_category.truncate(min_per_category);

        debug!(
            category = %category.slug,
            selected = in_category.len(),
            "category coverage"
        );
        picked.extend(in_category);
    }

    let guaranteed_ids: HashSet<String> = picked.iter().map(|&index| pool[index].id.clone()).collect();

    let mut slots: Vec<Option<Article>> = pool.into_iter().map(Some).collect();
    let guaranteed: Vec<Article> = picked
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect();

    let mut remaining = Vec::with_capacity(slots.len());
    for article in slots.into_iter().flatten() {
        if guaranteed_ids.contains(&article.id) {
            warn!("Dropping article {} with an id already used in the guaranteed set", article.id);
            continue;
        }
        remaining.push(article);
    }

    CoverageSplit {
        guaranteed,
        remaining,
    }
}
