//! Task domain model
//!
//! A [`TaskRecord`] is one normalized task from a batch. Tasks refer to each
//! other by their effective identifier: the `id` when present, otherwise the
//! `title`.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::date::parse_date;

pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;
pub const DEFAULT_IMPORTANCE: i64 = 5;
pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 10;

/// One user-supplied task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Optional unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display title, also the fallback identifier
    pub title: String,

    /// Due date as supplied (`YYYY-MM-DD`), parsed leniently
    #[serde(default)]
    pub due_date: Option<String>,

    /// Estimated effort in hours
    #[serde(default = "default_hours", deserialize_with = "hours_or_default")]
    pub estimated_hours: f64,

    /// Importance as supplied; read through [`TaskRecord::importance`]
    #[serde(
        default = "default_importance",
        deserialize_with = "importance_or_default"
    )]
    pub importance: i64,

    /// Effective identifiers of the tasks this one depends on
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,
}

fn default_hours() -> f64 {
    DEFAULT_ESTIMATED_HOURS
}

fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

/// A numeric field as it may arrive from a form-style client
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            Numeric::Int(n) => Ok(n as f64),
            Numeric::Float(f) => Ok(f),
            Numeric::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("expected a number, got {:?}", s)),
        }
    }

    /// Integers, integral floats and strings holding either
    fn into_i64(self) -> Result<i64, String> {
        match self {
            Numeric::Int(n) => Ok(n),
            Numeric::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => Ok(n),
                Err(_) => Numeric::Float(s.trim().parse().map_err(|_| {
                    format!("expected an integer, got {:?}", s)
                })?)
                .into_i64(),
            },
            Numeric::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
            Numeric::Float(f) => Err(format!("expected an integer, got {}", f)),
        }
    }
}

fn hours_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        Some(value) => value.into_f64().map_err(D::Error::custom),
        None => Ok(DEFAULT_ESTIMATED_HOURS),
    }
}

fn importance_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        Some(value) => value.into_i64().map_err(D::Error::custom),
        None => Ok(DEFAULT_IMPORTANCE),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaskRecord {
    /// Creates a task with default attributes
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_due(self, due: NaiveDate) -> Self {
        self.with_due_date(due.format(super::date::DATE_FORMAT).to_string())
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// The `id` if non-empty, otherwise the `title`
    pub fn effective_id(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.title,
        }
    }

    /// Importance clamped to 1..=10
    pub fn importance(&self) -> i64 {
        self.importance.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE)
    }

    /// Parsed due date, `None` when absent or malformed
    pub fn due(&self) -> Option<NaiveDate> {
        parse_date(self.due_date.as_deref())
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// Lookup from effective identifier to task, built once per batch
///
/// Iteration follows the order in which each identifier first appeared.
/// When two tasks share an identifier the later one wins.
#[derive(Debug, Default)]
pub struct TaskIndex<'a> {
    order: Vec<&'a str>,
    tasks: HashMap<&'a str, &'a TaskRecord>,
}

impl<'a> TaskIndex<'a> {
    pub fn build(tasks: &'a [TaskRecord]) -> Self {
        let mut index = Self::default();
        for task in tasks {
            let id = task.effective_id();
            if index.tasks.insert(id, task).is_none() {
                index.order.push(id);
            }
        }
        index
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a TaskRecord)> + '_ {
        self.order.iter().map(|id| (*id, self.tasks[id]))
    }

    /// For every identifier, how many other indexed tasks list it as a dependency
    ///
    /// A task listing the same dependency twice counts once. Self-references
    /// are not counted.
    pub fn blocking_counts(&self) -> HashMap<&'a str, usize> {
        let mut counts = HashMap::new();
        for (id, task) in self.iter() {
            let unique: HashSet<&str> = task
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|dep| *dep != id)
                .collect();
            for dep in unique {
                *counts.entry(dep).or_insert(0) += 1;
            }
        }
        counts
    }
}
