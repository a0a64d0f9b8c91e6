//! Prompt construction for the insight service

use std::fmt::Write;

use crate::domain::UserProfile;
use crate::progress::BoardStats;

/// Builds the productivity-insight prompt from a stats snapshot
///
/// The prompt is plain text; when `json_mode` is requested the service is
/// asked for a JSON string array, but the caller tolerates anything.
pub fn build_prompt(stats: &BoardStats, profile: &UserProfile, json_mode: bool) -> String {
    let mut prompt = String::new();

    writeln!(
        prompt,
        "You are a productivity coach. Based on the task data below, offer 3 short, actionable insights."
    )
    .ok();
    writeln!(prompt).ok();
    writeln!(
        prompt,
        "Tasks: {} total, {} completed, {} pending ({:.0}% completion rate).",
        stats.total, stats.completed, stats.pending, stats.completion_rate
    )
    .ok();
    writeln!(
        prompt,
        "Level {} with {} XP; current streak {} days; {} lifetime completions.",
        profile.level, profile.xp, profile.streak, profile.total_tasks
    )
    .ok();

    if !stats.peak_hours.is_empty() {
        let hours: Vec<String> = stats
            .peak_hours
            .iter()
            .map(|h| format!("{:02}:00", h))
            .collect();
        writeln!(prompt, "Most productive hours: {}.", hours.join(", ")).ok();
    }

    for category in &stats.categories {
        if category.total > 0 {
            writeln!(
                prompt,
                "Category {}: {} of {} done.",
                category.name, category.completed, category.total
            )
            .ok();
        }
    }

    if json_mode {
        writeln!(prompt).ok();
        writeln!(
            prompt,
            "Respond with only a JSON array of 3 insight strings, no other text."
        )
        .ok();
    }

    prompt
}
