//! Category CLI commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::CategoryId;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Color token
        #[arg(long, default_value = "gray")]
        color: String,

        /// Display glyph
        #[arg(long)]
        icon: Option<String>,

        /// XP multiplier for completions in this category
        #[arg(long, default_value_t = 1.0)]
        multiplier: f64,
    },

    /// List categories
    List,

    /// Delete a category, moving its tasks to the first remaining one
    Delete {
        /// Category ID
        id: String,
    },
}

pub fn run(cmd: CategoryCommands, output: &Output) -> Result<()> {
    match cmd {
        CategoryCommands::Add {
            name,
            color,
            icon,
            multiplier,
        } => add_category(output, &name, &color, icon, multiplier),
        CategoryCommands::List => list_categories(output),
        CategoryCommands::Delete { id } => delete_category(output, &id),
    }
}

fn add_category(
    output: &Output,
    name: &str,
    color: &str,
    icon: Option<String>,
    multiplier: f64,
) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;

    let category = board
        .add_category(name, color, icon, multiplier, Utc::now())?
        .clone();
    project.save_board(&board)?;

    if output.is_json() {
        output.data(&category);
    } else {
        output.success(&format!("Added category: {} - {}", category.id, category.name));
    }

    Ok(())
}

fn list_categories(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;

    if output.is_json() {
        output.data(&board.categories().to_vec());
        return Ok(());
    }

    println!("{:<12} {:<10} {:<6} NAME", "ID", "COLOR", "XP");
    println!("{}", "-".repeat(48));
    for category in board.categories() {
        println!(
            "{:<12} {:<10} {:<6} {}",
            category.id.to_string(),
            category.color,
            format!("x{}", category.xp_multiplier),
            category.name
        );
    }

    Ok(())
}

fn delete_category(output: &Output, id_str: &str) -> Result<()> {
    let project = Project::open_current()?;
    let mut board = project.load_board()?;
    let id: CategoryId = id_str.parse()?;

    let reassigned = board.delete_category(&id)?;
    project.save_board(&board)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "deleted": id.to_string(),
            "reassigned_tasks": reassigned,
        }));
    } else {
        output.success(&format!("Deleted category: {}", id));
        if reassigned > 0 {
            output.notice(&format!(
                "Moved {} task(s) to {}",
                reassigned,
                board.categories()[0].id
            ));
        }
    }

    Ok(())
}
