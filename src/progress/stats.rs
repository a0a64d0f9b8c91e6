//! Derived statistics over the board
//!
//! Read-only and recomputed on demand; nothing here mutates state. Tie
//! breaking is deterministic: category ties go to list order, peak-hour
//! ties to the lower hour.

use chrono::Timelike;
use serde::Serialize;

use crate::domain::{Category, CategoryId, Task};

/// Per-category task counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub id: CategoryId,
    pub name: String,
    pub total: usize,
    pub completed: usize,
}

/// Snapshot of every derived statistic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,

    /// Completed share of all tasks as a percentage; 0 for an empty board
    pub completion_rate: f64,

    /// Category with the most completed tasks, ties broken by list order
    pub most_productive_category: Option<CategoryId>,

    /// Up to 3 hours of day (0-23) with the most completions, descending
    /// by count, ascending by hour on ties
    pub peak_hours: Vec<u32>,

    /// Mean minutes from creation to completion; 0 when nothing qualifies
    pub average_completion_minutes: f64,

    pub categories: Vec<CategoryStats>,
}

/// Percentage of tasks completed, 0 for an empty list
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// The category with the highest completed-task count
///
/// Returns `None` when no task is completed. Categories are scanned in
/// list order, so ties go to the earlier category.
pub fn most_productive_category(tasks: &[Task], categories: &[Category]) -> Option<CategoryId> {
    let mut best: Option<(&Category, usize)> = None;

    for category in categories {
        let completed = tasks
            .iter()
            .filter(|t| t.completed && t.category_id == category.id)
            .count();
        if completed > 0 && best.map(|(_, n)| completed > n).unwrap_or(true) {
            best = Some((category, completed));
        }
    }

    best.map(|(c, _)| c.id.clone())
}

/// Top 3 completion hours of day, by count descending then hour ascending
pub fn peak_hours(tasks: &[Task]) -> Vec<u32> {
    let mut counts = [0usize; 24];
    for task in tasks {
        if let Some(done) = task.completed_at {
            counts[done.hour() as usize] += 1;
        }
    }

    let mut hours: Vec<(u32, usize)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(h, &n)| (h as u32, n))
        .collect();

    hours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    hours.into_iter().take(3).map(|(h, _)| h).collect()
}

/// Mean minutes between creation and completion; 0 when nothing qualifies
pub fn average_completion_minutes(tasks: &[Task]) -> f64 {
    let durations: Vec<f64> = tasks.iter().filter_map(|t| t.completion_minutes()).collect();
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

/// Computes every derived statistic in one pass over the snapshot
pub fn board_stats(tasks: &[Task], categories: &[Category]) -> BoardStats {
    let completed = tasks.iter().filter(|t| t.completed).count();

    let per_category = categories
        .iter()
        .map(|c| CategoryStats {
            id: c.id.clone(),
            name: c.name.clone(),
            total: tasks.iter().filter(|t| t.category_id == c.id).count(),
            completed: tasks
                .iter()
                .filter(|t| t.completed && t.category_id == c.id)
                .count(),
        })
        .collect();

    BoardStats {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
        completion_rate: completion_rate(tasks),
        most_productive_category: most_productive_category(tasks, categories),
        peak_hours: peak_hours(tasks),
        average_completion_minutes: average_completion_minutes(tasks),
        categories: per_category,
    }
}
