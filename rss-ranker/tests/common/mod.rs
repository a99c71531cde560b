#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rss_ranker::{Article, FeedDiversifier, RankingConfig, StaticCategories};
use std::sync::Arc;

/// Reference instant shared by every test that pins the clock
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Bare article published `minutes_ago` before `fixed_now()`
pub fn article(id: &str, source: &str, category: &str, minutes_ago: i64) -> Article {
    Article::new(id, source, category).with_published_at(fixed_now() - Duration::minutes(minutes_ago))
}

/// Article carrying every quality signal
pub fn rich_article(id: &str, source: &str, category: &str, minutes_ago: i64) -> Article {
    article(id, source, category, minutes_ago)
        .with_title("A headline that is comfortably over forty chars")
        .with_content("x".repeat(300))
        .with_author("Staff Reporter")
        .with_image_url("https://cdn.example.com/lead.jpg")
}

pub fn diversifier(config: RankingConfig) -> FeedDiversifier {
    FeedDiversifier::new(config, Arc::new(StaticCategories::reference()))
        .expect("valid ranking config")
}

pub fn ids(articles: &[Article]) -> Vec<String> {
    articles.iter().map(|a| a.id.clone()).collect()
}

/// Length of the longest same-source run
pub fn longest_source_run(articles: &[Article]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut last: Option<&str> = None;
    for article in articles {
        if last == Some(article.source.as_str()) {
            current += 1;
        } else {
            current = 1;
            last = Some(article.source.as_str());
        }
        longest = longest.max(current);
    }
    longest
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
