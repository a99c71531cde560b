mod common;

use chrono::Duration;
use common::{article, assert_close, fixed_now};
use rss_ranker::scoring::{
    category_balance_score, consecutive_repeat_penalty, over_representation_penalty,
    quality_score, recency_score, source_diversity_score,
};
use rss_ranker::{Article, DistributionSnapshot};
use rstest::rstest;

#[test]
fn test_recency_decays_with_age() {
    let now = fixed_now();

    assert_close(recency_score(&article("fresh", "a", "world", 0), now, 24.0), 1.0);
    assert_close(
        recency_score(&article("day-old", "a", "world", 24 * 60), now, 24.0),
        (-1.0f64).exp(),
    );

    let older = recency_score(&article("older", "a", "world", 48 * 60), now, 24.0);
    let newer = recency_score(&article("newer", "a", "world", 47 * 60), now, 24.0);
    assert!(newer > older);
}

#[test]
fn test_recency_clamps_future_timestamps() {
    let now = fixed_now();
    let future = Article::new("future", "a", "world").with_published_at(now + Duration::hours(3));

    assert_close(recency_score(&future, now, 24.0), 1.0);
}

#[test]
fn test_recency_falls_back_to_fetch_time_then_now() {
    let now = fixed_now();

    let fetched = Article::new("fetched", "a", "world").with_fetched_at(now - Duration::hours(12));
    assert_close(recency_score(&fetched, now, 24.0), (-0.5f64).exp());

    let undated = Article::new("undated", "a", "world");
    assert_close(recency_score(&undated, now, 24.0), 1.0);
}

#[test]
fn test_recency_respects_half_life() {
    let now = fixed_now();
    let item = article("six-hours", "a", "world", 6 * 60);

    assert_close(recency_score(&item, now, 6.0), (-1.0f64).exp());
    assert!(recency_score(&item, now, 48.0) > recency_score(&item, now, 6.0));
}

fn quality_fixture(image: bool, content_len: usize, author: bool, title_len: usize) -> Article {
    let mut item = Article::new("q", "a", "world").with_title("t".repeat(title_len));
    if image {
        item = item.with_image_url("https://cdn.example.com/i.png");
    }
    if content_len > 0 {
        item = item.with_content("c".repeat(content_len));
    }
    if author {
        item = item.with_author("Jane Doe");
    }
    item
}

#[rstest]
#[case::nothing(false, 0, false, 0, 0.0)]
#[case::image_only(true, 0, false, 0, 0.3)]
#[case::long_body(false, 201, false, 0, 0.4)]
#[case::medium_body(false, 150, false, 0, 0.2)]
#[case::body_at_lower_bound(false, 100, false, 0, 0.0)]
#[case::body_at_upper_bound(false, 200, false, 0, 0.2)]
#[case::author_only(false, 0, true, 0, 0.2)]
#[case::title_min(false, 0, false, 40, 0.1)]
#[case::title_max(false, 0, false, 120, 0.1)]
#[case::title_too_long(false, 0, false, 121, 0.0)]
#[case::title_too_short(false, 0, false, 39, 0.0)]
#[case::everything(true, 500, true, 60, 1.0)]
fn test_quality_signals(
    #[case] image: bool,
    #[case] content_len: usize,
    #[case] author: bool,
    #[case] title_len: usize,
    #[case] expected: f64,
) {
    let item = quality_fixture(image, content_len, author, title_len);
    assert_close(quality_score(&item), expected);
}

#[test]
fn test_quality_reads_inline_images_and_description() {
    let mut item = Article::new("inline", "a", "world");
    item.description = Some(format!("<img src=\"x.png\"> {}", "d".repeat(250)));

    // image from markup, body length from the description
    assert_close(quality_score(&item), 0.3 + 0.4);
}

#[test]
fn test_markup_does_not_count_towards_body_length() {
    let wrapped = format!("<div class=\"article-body\"><p>{}</p></div>", "x".repeat(80));
    let item = Article::new("wrapped", "a", "world").with_content(wrapped);

    assert_close(quality_score(&item), 0.0);
}

#[test]
fn test_blank_author_does_not_count() {
    let item = Article::new("blank", "a", "world").with_author("   ");
    assert_close(quality_score(&item), 0.0);
}

#[test]
fn test_over_representation_sigmoid() {
    assert_close(over_representation_penalty(0.3), 0.5);
    assert!((over_representation_penalty(0.0) - 0.9526).abs() < 1e-3);

    let shares = [0.0, 0.25, 0.5, 0.75, 1.0];
    for pair in shares.windows(2) {
        assert!(over_representation_penalty(pair[0]) > over_representation_penalty(pair[1]));
    }
    assert!(over_representation_penalty(1.0) > 0.0);
}

#[test]
fn test_consecutive_repeat_penalty_counts_last_two() {
    let mut snapshot = DistributionSnapshot::new();
    assert_close(consecutive_repeat_penalty("a", &snapshot), 1.0);

    snapshot.record(&article("1", "a", "world", 0));
    snapshot.record(&article("2", "b", "world", 0));
    assert_close(consecutive_repeat_penalty("a", &snapshot), 0.6);
    assert_close(consecutive_repeat_penalty("b", &snapshot), 0.6);
    assert_close(consecutive_repeat_penalty("c", &snapshot), 1.0);

    snapshot.record(&article("3", "b", "world", 0));
    assert_close(consecutive_repeat_penalty("b", &snapshot), 0.36);
    // "a" has fallen out of the window
    assert_close(consecutive_repeat_penalty("a", &snapshot), 1.0);
}

#[test]
fn test_source_diversity_without_history() {
    let snapshot = DistributionSnapshot::new();
    let score = source_diversity_score(&article("1", "a", "world", 0), &snapshot);

    assert_close(score, over_representation_penalty(0.0));
}

#[test]
fn test_dominant_source_is_suppressed() {
    let mut snapshot = DistributionSnapshot::new();
    for i in 0..60 {
        snapshot.record(&article(&format!("a{i}"), "a", "world", 0));
        snapshot.record(&article(&format!("b{i}"), "b", "world", 0));
    }
    for i in 60..100 {
        snapshot.record(&article(&format!("a{i}"), "a", "world", 0));
    }
    assert_eq!(snapshot.total(), 160);

    let score_a = source_diversity_score(&article("next-a", "a", "world", 0), &snapshot);
    let score_b = source_diversity_score(&article("next-b", "b", "world", 0), &snapshot);

    assert!(score_a < score_b, "dominant source scored {score_a} vs {score_b}");
    assert!(score_a >= 0.0);
}

#[test]
fn test_category_balance() {
    let mut snapshot = DistributionSnapshot::new();
    let categories = [
        "world", "politics", "business", "technology", "science", "health", "sports", "entertainment",
    ];
    for (i, category) in categories.iter().enumerate() {
        snapshot.record(&article(&i.to_string(), "a", category, 0));
    }

    // exactly at the expected share
    assert_close(category_balance_score(&article("x", "a", "world", 0), &snapshot, 8), 0.5);
    // unseen category gets the full bonus
    assert_close(category_balance_score(&article("y", "a", "weather", 0), &snapshot, 8), 1.0);

    let mut lopsided = DistributionSnapshot::new();
    for i in 0..5 {
        lopsided.record(&article(&i.to_string(), "a", "sports", 0));
    }
    assert_close(category_balance_score(&article("z", "a", "sports", 0), &lopsided, 8), 0.0);
}

#[test]
fn test_category_balance_with_empty_snapshot() {
    let snapshot = DistributionSnapshot::new();
    assert_close(category_balance_score(&article("x", "a", "world", 0), &snapshot, 8), 1.0);
    assert_close(category_balance_score(&article("x", "a", "world", 0), &snapshot, 0), 0.5);
}
