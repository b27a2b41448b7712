//! Ranking commands (analyze, suggest, cycles)

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::app::BatchArgs;
use super::output::Output;
use crate::domain::{Cycle, TaskRecord};
use crate::input::{read_batch, Config};
use crate::ranking::{Analysis, Ranker, Suggestions};
use crate::scoring::{Breakdown, Strategy};

/// Score and rank every task
pub fn analyze(
    output: &Output,
    config: &Config,
    batch: &BatchArgs,
    strategy: Option<&str>,
) -> Result<()> {
    let tasks = load(output, batch.input.as_deref())?;
    let ranker = ranker(output, config, batch, strategy);
    let analysis = ranker.analyze(&tasks);

    output.verbose_ctx(
        "analyze",
        &format!(
            "Scored {} tasks, found {} cycles",
            analysis.results.len(),
            analysis.cycles.len()
        ),
    );

    output.report(&analysis, || print_analysis(&analysis, ranker.today()))
}

/// Show the top tasks with explanations
pub fn suggest(
    output: &Output,
    config: &Config,
    batch: &BatchArgs,
    strategy: Option<&str>,
    top: Option<usize>,
) -> Result<()> {
    let tasks = load(output, batch.input.as_deref())?;
    let mut ranker = ranker(output, config, batch, strategy);
    if let Some(top) = top {
        ranker = ranker.with_limit(top);
    }
    let suggestions = ranker.suggest(&tasks);

    output.verbose_ctx(
        "suggest",
        &format!("Picked {} of {} tasks", suggestions.suggestions.len(), tasks.len()),
    );

    output.report(&suggestions, || print_suggestions(&suggestions, ranker.today()))
}

/// Report dependency cycles only
pub fn cycles(output: &Output, input: Option<&Path>) -> Result<()> {
    let tasks = load(output, input)?;
    let cycles = Ranker::new(Strategy::default()).cycles(&tasks);

    output.verbose_ctx("cycles", &format!("Found {} cycles", cycles.len()));

    output.report(&serde_json::json!({ "cycles": cycles }), || print_cycles(&cycles))
}

fn load(output: &Output, input: Option<&Path>) -> Result<Vec<TaskRecord>> {
    let source = match input {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "stdin".to_string(),
    };
    output.verbose_ctx("input", &format!("Reading batch from {}", source));

    let tasks = read_batch(input).context("Failed to load task batch")?;
    output.verbose_ctx("input", &format!("Loaded {} tasks", tasks.len()));
    Ok(tasks)
}

fn ranker(output: &Output, config: &Config, batch: &BatchArgs, requested: Option<&str>) -> Ranker {
    let ranker = match requested {
        None => Ranker::new(config.strategy),
        Some(name) => {
            if Strategy::lookup(name).is_none() {
                output.verbose_ctx(
                    "rank",
                    &format!("Unknown strategy '{}', using {}", name, Strategy::default()),
                );
            }
            Ranker::from_selector(name)
        }
    };

    let mut ranker = ranker
        .with_weights(config.weights)
        .with_limit(config.suggestions);
    if let Some(today) = batch.today {
        ranker = ranker.with_today(today);
    }

    output.verbose_ctx(
        "rank",
        &format!("Strategy: {}, reference date: {}", ranker.strategy(), ranker.today()),
    );
    ranker
}

fn print_analysis(analysis: &Analysis<'_>, today: NaiveDate) {
    println!("Strategy: {} (as of {})", analysis.strategy, today);
    println!();
    if analysis.results.is_empty() {
        println!("No tasks to rank.");
    } else {
        println!("{:<5} {:>8}  {:<20} {:<30} BREAKDOWN", "RANK", "SCORE", "ID", "TITLE");
        println!("{}", "-".repeat(90));
        for (rank, result) in analysis.results.iter().enumerate() {
            println!(
                "{:<5} {:>8.2}  {:<20} {:<30} {}",
                rank + 1,
                result.score,
                result.task.effective_id(),
                result.task.title,
                describe(&result.breakdown)
            );
        }
    }

    print_cycles(&analysis.cycles);
}

fn print_suggestions(suggestions: &Suggestions<'_>, today: NaiveDate) {
    if suggestions.suggestions.is_empty() {
        println!("No tasks to suggest.");
    } else {
        println!(
            "Top {} ({}, as of {}):",
            suggestions.suggestions.len(),
            suggestions.strategy,
            today
        );
        for (rank, item) in suggestions.suggestions.iter().enumerate() {
            println!();
            println!("{}. {}  [{:.2}]", rank + 1, item.task.title, item.score);
            println!("   {}", item.explanation);
            println!("   Why: {}", item.why.join("; "));
        }
    }

    print_cycles(&suggestions.cycles);
}

fn describe(breakdown: &Breakdown) -> String {
    match breakdown {
        Breakdown::Method { method } => method.to_string(),
        Breakdown::Factors(f) => format!(
            "u={:.2} i={:.2} e={:.2} d={:.2} b={:.2}",
            f.urgency, f.importance, f.effort, f.dependency, f.blocking
        ),
    }
}

fn print_cycles(cycles: &[Cycle]) {
    println!();
    if cycles.is_empty() {
        println!("No dependency cycles.");
    } else {
        println!("Dependency cycles ({}):", cycles.len());
        for cycle in cycles {
            println!("  {}", cycle.join(" -> "));
        }
    }
}
