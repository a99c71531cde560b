use crate::types::{Article, ScoredArticle};
use std::collections::HashSet;
use tracing::warn;

/// Guaranteed articles first, then the ranked remainder.
///
/// Remainder articles whose id is already present are skipped. The coverage
/// split never produces such overlap, but the output must stay free of
/// duplicate ids whatever the partitioning does.
pub fn interleave(guaranteed: Vec<Article>, ranked: Vec<ScoredArticle>) -> Vec<Article> {
    let mut seen: HashSet<String> = guaranteed.iter().map(|article| article.id.clone()).collect();
    let mut feed = Vec::with_capacity(guaranteed.len() + ranked.len());
    feed.extend(guaranteed);

    for scored in ranked {
        if !seen.insert(scored.article.id.clone()) {
            warn!("Skipping duplicate article {} in ranked remainder", scored.article.id);
            continue;
        }
        feed.push(scored.article);
    }

    feed
}
