//! # Ranking
//!
//! Runs a scoring strategy over a whole batch and merges the result with the
//! cycle report.
//!
//! - [`Ranker::analyze`] scores every task and sorts by score, highest first.
//! - [`Ranker::suggest`] keeps only the top few, each with a short explanation
//!   and the reasons it made the cut.
//!
//! Sorting is stable, so tasks with equal scores keep their batch order.

mod explain;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Cycle, DependencyGraph, TaskIndex, TaskRecord};
use crate::scoring::{self, Breakdown, ScoringContext, Strategy, Weights};

use explain::{explanation, reasons};

/// Number of suggestions returned by default
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// One scored task
#[derive(Debug, Clone, Serialize)]
pub struct RankedTask<'a> {
    pub task: &'a TaskRecord,
    pub score: f64,
    pub breakdown: Breakdown,
}

/// Full ranking of a batch
#[derive(Debug, Clone, Serialize)]
pub struct Analysis<'a> {
    /// Selector as received, lowercased
    pub strategy: String,
    pub cycles: Vec<Cycle>,
    pub results: Vec<RankedTask<'a>>,
}

/// A top-ranked task with its justification
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion<'a> {
    pub task: &'a TaskRecord,
    pub score: f64,
    pub explanation: String,
    pub why: Vec<&'static str>,
}

/// The best few tasks of a batch
#[derive(Debug, Clone, Serialize)]
pub struct Suggestions<'a> {
    pub strategy: String,
    pub cycles: Vec<Cycle>,
    pub suggestions: Vec<Suggestion<'a>>,
}

/// Ranks task batches with one strategy against one reference date
#[derive(Debug, Clone)]
pub struct Ranker {
    strategy: Strategy,
    selector: String,
    weights: Weights,
    today: NaiveDate,
    limit: usize,
}

impl Ranker {
    /// Creates a ranker using the local date as "today"
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            selector: strategy.as_str().to_string(),
            weights: Weights::default(),
            today: crate::domain::today(),
            limit: DEFAULT_SUGGESTIONS,
        }
    }

    /// Creates a ranker from a strategy name
    ///
    /// Unknown names score with `smart`; reports still echo the name given.
    pub fn from_selector(name: &str) -> Self {
        Self {
            selector: name.to_lowercase(),
            ..Self::new(Strategy::from_name(name))
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Pins the reference date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Sets how many suggestions [`Ranker::suggest`] keeps
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Scores and sorts every task in the batch
    pub fn analyze<'a>(&self, tasks: &'a [TaskRecord]) -> Analysis<'a> {
        let (cycles, mut results) = self.score_batch(tasks);
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        Analysis {
            strategy: self.selector.clone(),
            cycles,
            results,
        }
    }

    /// Returns the top-ranked tasks with explanations and reasons
    pub fn suggest<'a>(&self, tasks: &'a [TaskRecord]) -> Suggestions<'a> {
        let (cycles, mut scored) = self.score_batch(tasks);
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let suggestions = scored
            .into_iter()
            .take(self.limit)
            .map(|ranked| Suggestion {
                task: ranked.task,
                score: ranked.score,
                explanation: explanation(ranked.task, self.today),
                why: reasons(ranked.task, self.today),
            })
            .collect();

        Suggestions {
            strategy: self.selector.clone(),
            cycles,
            suggestions,
        }
    }

    /// Detects cycles without scoring
    pub fn cycles(&self, tasks: &[TaskRecord]) -> Vec<Cycle> {
        let index = TaskIndex::build(tasks);
        DependencyGraph::from_index(&index).detect_cycles()
    }

    fn score_batch<'a>(&self, tasks: &'a [TaskRecord]) -> (Vec<Cycle>, Vec<RankedTask<'a>>) {
        let index = TaskIndex::build(tasks);
        let cycles = DependencyGraph::from_index(&index).detect_cycles();
        let ctx = ScoringContext::new(&index, self.today).with_weights(self.weights);

        let results = tasks
            .iter()
            .map(|task| {
                let scored = scoring::score(self.strategy, task, &ctx);
                RankedTask {
                    task,
                    score: scored.score,
                    breakdown: scored.breakdown,
                }
            })
            .collect();

        (cycles, results)
    }
}
