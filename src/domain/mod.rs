//! Domain models for triage
//!
//! Contains the task model, date handling and the dependency graph, without
//! any I/O concerns.

mod date;
mod graph;
mod task;

pub use date::{days_until, parse_date, today, DATE_FORMAT};
pub use graph::{Cycle, DependencyGraph};
pub use task::{TaskIndex, TaskRecord};
