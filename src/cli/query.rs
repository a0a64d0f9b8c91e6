//! Read-only query commands: status, profile, achievements

use anyhow::Result;

use super::output::Output;
use crate::progress::board_stats;
use crate::storage::Project;

/// Shows the derived statistics overview
pub fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;
    let stats = board_stats(board.tasks(), board.categories());

    if output.is_json() {
        output.data(&stats);
        return Ok(());
    }

    println!("Tasks:           {} total, {} pending, {} completed", stats.total, stats.pending, stats.completed);
    println!("Completion rate: {:.0}%", stats.completion_rate);

    if let Some(id) = &stats.most_productive_category {
        let name = board
            .category(id)
            .map(|c| c.name.as_str())
            .unwrap_or(id.as_str());
        println!("Top category:    {}", name);
    }

    if !stats.peak_hours.is_empty() {
        let hours: Vec<String> = stats
            .peak_hours
            .iter()
            .map(|h| format!("{:02}:00", h))
            .collect();
        println!("Peak hours:      {}", hours.join(", "));
    }

    if stats.average_completion_minutes > 0.0 {
        println!(
            "Avg completion:  {:.1} minutes",
            stats.average_completion_minutes
        );
    }

    output.blank();
    println!("{:<12} {:>6} {:>6}", "CATEGORY", "DONE", "TOTAL");
    for category in &stats.categories {
        println!(
            "{:<12} {:>6} {:>6}",
            category.name, category.completed, category.total
        );
    }

    Ok(())
}

/// Shows the user profile: level, XP, streak
pub fn profile(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let profile = project.load_profile()?;

    if output.is_json() {
        output.data(&profile);
        return Ok(());
    }

    println!("Level:       {}", profile.level);
    println!("XP:          {} / {}", profile.xp, profile.xp_to_next);
    println!("Streak:      {} day(s)", profile.streak);
    println!("Completions: {}", profile.total_tasks);
    println!("Joined:      {}", profile.joined_at.format("%Y-%m-%d"));

    Ok(())
}

/// Shows the achievement list with unlock state
pub fn achievements(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let achievements = project.load_achievements()?;

    if output.is_json() {
        output.data(&achievements);
        return Ok(());
    }

    for achievement in &achievements {
        let state = if achievement.is_unlocked() {
            "unlocked".to_string()
        } else {
            format!("{}/{}", achievement.progress, achievement.max_progress)
        };
        println!(
            "{:<12} [{:<9}] {:<10} {} - {}",
            achievement.id,
            achievement.rarity.label(),
            state,
            achievement.title,
            achievement.description
        );
    }

    Ok(())
}
