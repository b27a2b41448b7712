//! triage - rank task batches by priority and flag circular dependencies
//!
//! A batch of tasks is scored with one of several strategies (`smart`,
//! `simple`, `fastest`, `impact`, `deadline`), sorted highest first, and
//! checked for dependency cycles. The engine is synchronous and stateless:
//! every call builds its own index and graph and reads "today" once.

pub mod domain;
pub mod scoring;
pub mod ranking;
pub mod input;
pub mod cli;

pub use domain::{Cycle, DependencyGraph, TaskIndex, TaskRecord};
pub use ranking::{Analysis, Ranker, Suggestions};
pub use scoring::{Strategy, Weights};
