//! Task CLI commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::insight_cmd;
use super::output::Output;
use crate::domain::{CategoryId, Difficulty, Priority, Task, TaskId, DEFAULT_XP_VALUE};
use crate::progress::{record_completion, ProgressEvent};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Category ID (defaults to the first category)
        #[arg(long, short)]
        category: Option<String>,

        /// Priority: low, medium, high or urgent
        #[arg(long, short, default_value = "medium")]
        priority: String,

        /// Difficulty from 1 (trivial) to 5 (hard)
        #[arg(long, short, default_value_t = 1)]
        difficulty: u8,

        /// Base XP awarded on completion
        #[arg(long, default_value_t = DEFAULT_XP_VALUE)]
        xp: u32,
    },

    /// Complete a task and collect the rewards
    Done {
        /// Task ID
        id: String,
    },

    /// Return a completed task to the pending list
    Reopen {
        /// Task ID
        id: String,
    },

    /// Delete a task permanently
    Delete {
        /// Task ID
        id: String,
    },

    /// Move a task to another category
    Move {
        /// Task ID
        id: String,

        /// Target category ID
        category: String,
    },

    /// List tasks, pending first
    List {
        /// Filter by category ID
        #[arg(long, short)]
        category: Option<String>,

        /// Show only pending tasks
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Show only completed tasks
        #[arg(long)]
        done: bool,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            category,
            priority,
            difficulty,
            xp,
        } => add_task(output, &title, category.as_deref(), &priority, difficulty, xp),
        TaskCommands::Done { id } => complete_task(output, &id),
        TaskCommands::Reopen { id } => reopen_task(output, &id),
        TaskCommands::Delete { id } => delete_task(output, &id),
        TaskCommands::Move { id, category } => move_task(output, &id, &category),
        TaskCommands::List {
            category,
            pending,
            done,
        } => list_tasks(output, category.as_deref(), pending, done),
        TaskCommands::Show { id } => show_task(output, &id),
    }
}

fn parse_priority(s: &str) -> Result<Priority> {
    match s {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        "urgent" => Ok(Priority::Urgent),
        other => anyhow::bail!(
            "Unknown priority: {}. Use 'low', 'medium', 'high' or 'urgent'",
            other
        ),
    }
}

fn add_task(
    output: &Output,
    title: &str,
    category: Option<&str>,
    priority: &str,
    difficulty: u8,
    xp: u32,
) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;

    let category_id = match category {
        Some(raw) => raw.parse::<CategoryId>()?,
        None => board.categories()[0].id.clone(),
    };
    let priority = parse_priority(priority)?;

    let task = board
        .add_task(
            title,
            category_id,
            priority,
            Difficulty::new(difficulty),
            xp,
            Utc::now(),
        )?
        .clone();
    project.save_board(&board)?;

    output.verbose_ctx("task", &format!("Created {}", task.id));
    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id.to_string(),
            "title": task.title,
            "category_id": task.category_id.to_string(),
            "priority": task.priority.label(),
            "difficulty": task.difficulty.value(),
        }));
    } else {
        output.success(&format!("Added task: {} - {}", task.id, task.title));
    }

    Ok(())
}

fn complete_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;
    let id: TaskId = id_str.parse()?;

    // Lookup misses are soft no-ops, not errors
    let Some(task) = board.task(&id) else {
        output.success(&format!("Task not found: {} (nothing to do)", id));
        return Ok(());
    };
    if task.completed {
        output.success(&format!("Task already completed: {}", id));
        return Ok(());
    }

    let now = Utc::now();
    let task = match board.toggle_task(&id, now) {
        Some(task) => task.clone(),
        None => return Ok(()),
    };
    let category = board
        .category(&task.category_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Category missing for task {}", task.id))?;

    let mut profile = project.load_profile()?;
    let mut achievements = project.load_achievements()?;
    let events = record_completion(
        &mut profile,
        &mut achievements,
        board.tasks(),
        &task,
        &category,
        now,
    );

    project.save_board(&board)?;
    project.save_profile(&profile)?;
    project.save_achievements(&achievements)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id.to_string(),
            "title": task.title,
            "completed_at": task.completed_at,
            "level": profile.level,
            "xp": profile.xp,
            "streak": profile.streak,
            "events": render_events_json(&events),
        }));
    } else {
        output.success(&format!("Completed: {}", task.title));
        render_events(output, &events);
    }

    // Advisory: failures here never roll anything back
    if project.config().project.auto_insight {
        insight_cmd::generate(output, &project, None, false)?;
    }

    Ok(())
}

fn render_events(output: &Output, events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::XpGained { amount } => output.notice(&format!("+{} XP", amount)),
            ProgressEvent::LevelUp { level } => {
                output.notice(&format!("Level up! You reached level {}", level))
            }
            ProgressEvent::AchievementUnlocked {
                title, xp_reward, ..
            } => output.notice(&format!(
                "Achievement unlocked: {} (+{} XP)",
                title, xp_reward
            )),
        }
    }
}

fn render_events_json(events: &[ProgressEvent]) -> Vec<serde_json::Value> {
    events
        .iter()
        .map(|event| match event {
            ProgressEvent::XpGained { amount } => {
                serde_json::json!({"type": "xp_gained", "amount": amount})
            }
            ProgressEvent::LevelUp { level } => {
                serde_json::json!({"type": "level_up", "level": level})
            }
            ProgressEvent::AchievementUnlocked { id, title, xp_reward } => serde_json::json!({
                "type": "achievement_unlocked",
                "id": id,
                "title": title,
                "xp_reward": xp_reward,
            }),
        })
        .collect()
}

fn reopen_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;
    let id: TaskId = id_str.parse()?;

    match board.task(&id) {
        None => {
            output.success(&format!("Task not found: {} (nothing to do)", id));
            return Ok(());
        }
        Some(task) if !task.completed => {
            output.success(&format!("Task is already pending: {}", id));
            return Ok(());
        }
        Some(_) => {}
    }

    // Earned XP is not revoked; only the completion flag moves back
    board.toggle_task(&id, Utc::now());
    project.save_board(&board)?;

    output.success(&format!("Reopened: {}", id));
    Ok(())
}

fn delete_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;
    let id: TaskId = id_str.parse()?;

    if board.delete_task(&id) {
        project.save_board(&board)?;
        output.success(&format!("Deleted: {}", id));
    } else {
        output.success(&format!("Task not found: {} (nothing to do)", id));
    }

    Ok(())
}

fn move_task(output: &Output, id_str: &str, category_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;
    let id: TaskId = id_str.parse()?;
    let category_id: CategoryId = category_str.parse()?;

    if board.move_task(&id, category_id.clone())? {
        project.save_board(&board)?;
        output.success(&format!("Moved {} to {}", id, category_id));
    } else {
        output.success(&format!("Task not found: {} (nothing to do)", id));
    }

    Ok(())
}

fn list_tasks(
    output: &Output,
    category: Option<&str>,
    pending_only: bool,
    done_only: bool,
) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;

    let category_id = category.map(str::parse::<CategoryId>).transpose()?;

    let selected: Vec<&Task> = board
        .tasks()
        .iter()
        .filter(|t| category_id.as_ref().map(|c| &t.category_id == c).unwrap_or(true))
        .filter(|t| !(pending_only && t.completed) && !(done_only && !t.completed))
        .collect();

    if output.is_json() {
        let items: Vec<_> = selected
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.to_string(),
                    "title": t.title,
                    "completed": t.completed,
                    "category_id": t.category_id.to_string(),
                    "priority": t.priority.label(),
                    "difficulty": t.difficulty.value(),
                    "xp_value": t.xp_value,
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No tasks");
        return Ok(());
    }

    let (pending, completed): (Vec<&&Task>, Vec<&&Task>) =
        selected.iter().partition(|t| !t.completed);

    if !pending.is_empty() {
        println!("Pending ({})", pending.len());
        for task in &pending {
            print_row(&board, task);
        }
    }
    if !completed.is_empty() {
        if !pending.is_empty() {
            output.blank();
        }
        println!("Completed ({})", completed.len());
        for task in &completed {
            print_row(&board, task);
        }
    }

    Ok(())
}

fn print_row(board: &crate::domain::Board, task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let category = board
        .category(&task.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");
    println!(
        "  [{}] {:<12} {:<10} {}",
        mark,
        task.id.to_string(),
        category,
        task.title
    );
}

fn show_task(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;
    let id: TaskId = id_str.parse()?;

    let task = board
        .task(&id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;

    if output.is_json() {
        output.data(task);
        return Ok(());
    }

    let category = board
        .category(&task.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");

    println!("Task:       {}", task.id);
    println!("Title:      {}", task.title);
    println!("Category:   {}", category);
    println!("Priority:   {}", task.priority.label());
    println!("Difficulty: {}", task.difficulty.value());
    println!("Base XP:    {}", task.xp_value);
    println!("Created:    {}", task.created_at.to_rfc3339());
    match task.completed_at {
        Some(done) => println!("Completed:  {}", done.to_rfc3339()),
        None => println!("Completed:  pending"),
    }

    Ok(())
}
