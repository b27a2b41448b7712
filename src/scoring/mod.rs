//! # Scoring Strategies
//!
//! Pure functions turning a task into a priority score plus a breakdown.
//!
//! | Strategy | Range | Breakdown |
//! |----------|-------|-----------|
//! | `simple` | 0–100 | method tag |
//! | `smart` (default) | 0–100 | five normalized factors |
//! | `fastest` | unbounded above | method tag |
//! | `impact` | 10–100 | method tag |
//! | `deadline` | 0–100 | method tag |
//!
//! Strategies that need cross-task data (only `smart`, for blocking counts)
//! read it from a [`ScoringContext`] built once per batch. The context also
//! pins the reference date so every task in a batch sees the same "today".

mod heuristics;
mod simple;
mod smart;

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{days_until, TaskIndex, TaskRecord};

pub use smart::{Factors, Weights};

/// A named scoring function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Simple,
    #[default]
    Smart,
    Fastest,
    Impact,
    Deadline,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Simple,
        Strategy::Smart,
        Strategy::Fastest,
        Strategy::Impact,
        Strategy::Deadline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Simple => "simple",
            Strategy::Smart => "smart",
            Strategy::Fastest => "fastest",
            Strategy::Impact => "impact",
            Strategy::Deadline => "deadline",
        }
    }

    /// Looks up a strategy by name, case-insensitively
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Resolves a selector, falling back to `smart` for unknown names
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a score was composed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Breakdown {
    /// Only names the method that produced the score
    Method { method: Strategy },
    /// Normalized `smart` factors
    Factors(Factors),
}

/// A score and its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub score: f64,
    pub breakdown: Breakdown,
}

impl Scored {
    fn method(strategy: Strategy, score: f64) -> Self {
        Self {
            score,
            breakdown: Breakdown::Method { method: strategy },
        }
    }
}

/// Per-batch inputs shared by every scoring call
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    today: NaiveDate,
    weights: Weights,
    blocking: HashMap<&'a str, usize>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(index: &TaskIndex<'a>, today: NaiveDate) -> Self {
        Self {
            today,
            weights: Weights::default(),
            blocking: index.blocking_counts(),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Number of other tasks in the batch that depend on `id`
    pub fn blocking_count(&self, id: &str) -> usize {
        self.blocking.get(id).copied().unwrap_or(0)
    }

    /// Days until the task is due, `None` without a valid due date
    pub fn days_until(&self, task: &TaskRecord) -> Option<i64> {
        days_until(task.due(), self.today)
    }
}

/// Scores one task with the given strategy
pub fn score(strategy: Strategy, task: &TaskRecord, ctx: &ScoringContext<'_>) -> Scored {
    match strategy {
        Strategy::Simple => Scored::method(strategy, simple::score(task, ctx)),
        Strategy::Smart => {
            let (score, factors) = smart::score(task, ctx);
            Scored {
                score,
                breakdown: Breakdown::Factors(factors),
            }
        }
        Strategy::Fastest => Scored::method(strategy, heuristics::fastest(task)),
        Strategy::Impact => Scored::method(strategy, heuristics::impact(task)),
        Strategy::Deadline => Scored::method(strategy, heuristics::deadline(task, ctx)),
    }
}

/// Rounds to `places` decimals, exact ties going to the even digit
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
