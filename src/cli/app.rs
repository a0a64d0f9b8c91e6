//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{category, insight_cmd, query, task};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(author, version, about = "Local-first gamified task management")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured preference)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new taskflow project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage categories
    #[command(subcommand)]
    Category(category::CategoryCommands),

    /// Show the statistics overview
    Status,

    /// Show level, XP and streak
    Profile,

    /// Show achievements and unlock progress
    Achievements,

    /// Generate AI productivity insights
    Insight {
        /// Model identifier to pass to the insight service
        #[arg(long)]
        model: Option<String>,

        /// Print the raw service response without parsing
        #[arg(long)]
        raw: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()
            .map(|c| c.global.default_format.into())
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("TaskFlow starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.success(&format!(
                "Initialized taskflow project at {}",
                project.root().display()
            ));
        }

        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Category(cmd) => category::run(cmd, &output)?,

        Commands::Status => {
            output.verbose("Gathering statistics");
            query::status(&output)?
        }
        Commands::Profile => query::profile(&output)?,
        Commands::Achievements => query::achievements(&output)?,

        Commands::Insight { model, raw } => {
            insight_cmd::run(&output, model.as_deref(), raw)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
