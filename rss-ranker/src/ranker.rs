use crate::config::{RankingConfig, ScoreWeights};
use crate::distribution::DistributionSnapshot;
use crate::scoring::{category_balance_score, quality_score, recency_score, source_diversity_score};
use crate::types::{Article, Result, ScoreBreakdown, ScoredArticle};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Everything the scorers read besides the article itself. Fixed for the
/// whole remaining set.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub snapshot: &'a DistributionSnapshot,
    pub category_count: usize,
    pub now: DateTime<Utc>,
}

/// Weighted combination of the four signals.
///
/// Construction validates the configuration, so a ranker that exists can
/// always score.
#[derive(Debug, Clone)]
pub struct CompositeRanker {
    weights: ScoreWeights,
    half_life_hours: f64,
    max_consecutive_per_source: usize,
}

impl CompositeRanker {
    pub fn new(config: &RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            weights: config.weights,
            half_life_hours: config.recency_half_life_hours,
            max_consecutive_per_source: config.max_consecutive_per_source,
        })
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    pub fn breakdown(&self, article: &Article, ctx: &ScoringContext<'_>) -> ScoreBreakdown {
        ScoreBreakdown {
            recency: recency_score(article, ctx.now, self.half_life_hours),
            quality: quality_score(article),
            diversity: source_diversity_score(article, ctx.snapshot),
            category: category_balance_score(article, ctx.snapshot, ctx.category_count),
        }
    }

    pub fn composite(&self, breakdown: &ScoreBreakdown) -> f64 {
        let weights = &self.weights;
        let score = weights.recency * breakdown.recency
            + weights.diversity * breakdown.diversity
            + weights.quality * breakdown.quality
            + weights.category * breakdown.category;
        score.clamp(0.0, 1.0)
    }

    pub fn score(&self, article: Article, ctx: &ScoringContext<'_>) -> ScoredArticle {
        let breakdown = self.breakdown(&article, ctx);
        let score = self.composite(&breakdown);
        ScoredArticle {
            article,
            score,
            breakdown,
        }
    }

    /// Score the remaining set against the frozen snapshot and order it by
    /// descending score. Equal scores keep their input order.
    pub fn rank(&self, remaining: Vec<Article>, ctx: &ScoringContext<'_>) -> Vec<ScoredArticle> {
        let mut scored: Vec<ScoredArticle> = remaining
            .into_iter()
            .map(|article| self.score(article, ctx))
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            ranked = scored.len(),
            top_score = scored.first().map(|s| s.score),
            "Ranked remaining articles"
        );

        smooth_source_runs(
            scored,
            ctx.snapshot.recent_sources(self.max_consecutive_per_source),
            self.max_consecutive_per_source,
        )
    }
}

/// Reorder `ranked` so that no source appears more than `max_run` times in a
/// row, whenever some arrangement allows it.
///
/// Walks the score order and places the best pending article that neither
/// extends a full run nor leaves the rest impossible to arrange. Nothing is
/// dropped or rescored. `placed_tail` holds the sources placed before the
/// first ranked article. A `max_run` of zero returns the input unchanged.
///
/// Pending articles are kept in one score-ordered queue per source, so each
/// placement only compares the queue heads.
pub fn smooth_source_runs(
    ranked: Vec<ScoredArticle>,
    placed_tail: &[String],
    max_run: usize,
) -> Vec<ScoredArticle> {
    if max_run == 0 || ranked.len() < 2 {
        return ranked;
    }

    let mut run = RunState::from_tail(placed_tail, max_run);
    let mut pending = ranked.len();
    let mut queues = group_by_source(ranked);
    let mut placed = Vec::with_capacity(pending);
    let mut moved = 0usize;

    while pending > 0 {
        // a single source left keeps its score order
        if queues.len() == 1 {
            placed.extend(queues.swap_remove(0).items.into_iter().map(|(_, scored)| scored));
            break;
        }

        let slot = pick_slot(&queues, &run, pending, max_run);
        if Some(slot) != best_head(&queues, |_| true) {
            moved += 1;
        }

        let Some((_, next)) = queues[slot].items.pop_front() else {
            break;
        };
        if queues[slot].items.is_empty() {
            queues.swap_remove(slot);
        }
        pending -= 1;
        run.push(next.source());
        placed.push(next);
    }

    if moved > 0 {
        debug!(moved, "Pulled articles forward to break same-source runs");
    }

    placed
}

/// Pending articles of one source, each tagged with its position in the
/// score order.
#[derive(Debug)]
struct SourceQueue {
    source: String,
    items: VecDeque<(usize, ScoredArticle)>,
}

impl SourceQueue {
    fn head_rank(&self) -> usize {
        self.items.front().map(|(rank, _)| *rank).unwrap_or(usize::MAX)
    }
}

fn group_by_source(ranked: Vec<ScoredArticle>) -> Vec<SourceQueue> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut queues: Vec<SourceQueue> = Vec::new();

    for (rank, scored) in ranked.into_iter().enumerate() {
        let slot = match slots.get(scored.source()).copied() {
            Some(slot) => slot,
            None => {
                queues.push(SourceQueue {
                    source: scored.source().to_string(),
                    items: VecDeque::new(),
                });
                slots.insert(scored.source().to_string(), queues.len() - 1);
                queues.len() - 1
            }
        };
        queues[slot].items.push_back((rank, scored));
    }

    queues
}

/// Queue whose head comes first in score order among those accepted by `allowed`.
fn best_head(queues: &[SourceQueue], allowed: impl Fn(&SourceQueue) -> bool) -> Option<usize> {
    queues
        .iter()
        .enumerate()
        .filter(|(_, queue)| allowed(queue))
        .min_by_key(|(_, queue)| queue.head_rank())
        .map(|(slot, _)| slot)
}

fn pick_slot(queues: &[SourceQueue], run: &RunState, pending: usize, max_run: usize) -> usize {
    let leaders = Leaders::of(queues);
    let open = |queue: &SourceQueue| !run.would_exceed(&queue.source, max_run);

    best_head(queues, |queue| {
        open(queue) && arrangeable_after(queue, leaders.largest_besides(&queue.source), run, pending, max_run)
    })
    .or_else(|| best_head(queues, open))
    .or_else(|| best_head(queues, |_| true))
    .unwrap_or(0)
}

#[derive(Debug, Default)]
struct RunState {
    source: Option<String>,
    length: usize,
}

impl RunState {
    fn from_tail(tail: &[String], max_run: usize) -> Self {
        let mut state = Self::default();
        for source in tail {
            state.push(source);
        }
        state.length = state.length.min(max_run);
        state
    }

    fn push(&mut self, source: &str) {
        if self.source.as_deref() == Some(source) {
            self.length += 1;
        } else {
            self.source = Some(source.to_string());
            self.length = 1;
        }
    }

    fn would_exceed(&self, source: &str, max_run: usize) -> bool {
        self.source.as_deref() == Some(source) && self.length >= max_run
    }

    fn length_after(&self, source: &str) -> usize {
        if self.source.as_deref() == Some(source) {
            self.length + 1
        } else {
            1
        }
    }
}

/// The two largest pending counts, enough to find the biggest source other
/// than any given one.
#[derive(Debug)]
struct Leaders<'a> {
    top_source: Option<&'a str>,
    top: usize,
    runner_up: usize,
}

impl<'a> Leaders<'a> {
    fn of(queues: &'a [SourceQueue]) -> Self {
        let mut leaders = Self {
            top_source: None,
            top: 0,
            runner_up: 0,
        };
        for queue in queues {
            let count = queue.items.len();
            if count > leaders.top {
                leaders.runner_up = leaders.top;
                leaders.top = count;
                leaders.top_source = Some(queue.source.as_str());
            } else if count > leaders.runner_up {
                leaders.runner_up = count;
            }
        }
        leaders
    }

    fn largest_besides(&self, source: &str) -> usize {
        if self.top_source == Some(source) {
            self.runner_up
        } else {
            self.top
        }
    }
}

/// Whether the pending articles can still be laid out without a run longer
/// than `max_run` once the head of `candidate` is placed next.
///
/// A source with `c` articles needs `c <= max_run * (others + 1)` slots; the
/// candidate's own leftovers only get `max_run - run_length` more in the run
/// it just extended. Both bounds grow with `c`, so checking the largest other
/// source covers all of them.
fn arrangeable_after(
    candidate: &SourceQueue,
    largest_other: usize,
    run: &RunState,
    pending: usize,
    max_run: usize,
) -> bool {
    let remaining = pending - 1;
    let run_length = run.length_after(&candidate.source).min(max_run);

    let own = candidate.items.len() - 1;
    if own > 0 && own > (max_run - run_length) + max_run * (remaining - own) {
        return false;
    }

    largest_other <= max_run * (remaining - largest_other + 1)
}
