//! Project management
//!
//! Handles project initialization and provides the dependency-injected
//! state handles: every CLI command opens a project, loads the snapshot
//! it needs, mutates it in memory and flushes it back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use thiserror::Error;

use crate::domain::{Achievement, Board, Category, UserProfile};

use super::config::Config;
use super::jsonl::{InsightLog, TaskStore};
use super::snapshot::SnapshotStore;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a taskflow project. Run 'taskflow init' first.")]
    NotInProject,
}

/// A TaskFlow project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(".taskflow").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;
        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;
        Self::open(root)
    }

    /// Initializes a new project, seeding the starter data
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(".taskflow");

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create .taskflow directory: {}", data_dir.display())
        })?;

        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# TaskFlow configuration

# Generate an insight automatically after completing a task
auto_insight = false

# Display preferences
theme = "light"
sound = true

[insight]
# Command invoked for AI insights; prompt arrives on stdin.
# command = "my-llm-cli --quiet"
model = "default"
json_mode = true
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let project = Self::open(root)?;

        // Seed the persisted keys exactly once
        let categories = project.category_store();
        if !categories.exists() {
            categories.write(&Category::starter_catalog())?;
        }
        let profile = project.profile_store();
        if !profile.exists() {
            profile.write(&UserProfile::new(Utc::now()))?;
        }
        let achievements = project.achievement_store();
        if !achievements.exists() {
            achievements.write(&Achievement::catalog())?;
        }

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .taskflow data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(".taskflow")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the task store
    pub fn task_store(&self) -> TaskStore {
        TaskStore::for_project(&self.root)
    }

    /// Returns the category key store
    pub fn category_store(&self) -> SnapshotStore {
        SnapshotStore::for_key(&self.root, "categories")
    }

    /// Returns the user profile key store
    pub fn profile_store(&self) -> SnapshotStore {
        SnapshotStore::for_key(&self.root, "profile")
    }

    /// Returns the achievements key store
    pub fn achievement_store(&self) -> SnapshotStore {
        SnapshotStore::for_key(&self.root, "achievements")
    }

    /// Returns the insight log
    pub fn insight_log(&self) -> InsightLog {
        InsightLog::for_project(&self.root)
    }

    /// Loads the board from the persisted snapshot
    ///
    /// Missing keys fall back to seeded defaults, so a project created by
    /// an older revision still loads.
    pub fn load_board(&self) -> Result<Board> {
        let tasks = self.task_store().read_all()?;
        let categories: Vec<Category> =
            self.category_store().read_or(Category::starter_catalog)?;
        Ok(Board::new(tasks, categories))
    }

    /// Flushes the board back to disk
    pub fn save_board(&self, board: &Board) -> Result<()> {
        self.task_store().write_all(board.tasks())?;
        self.category_store().write(&board.categories().to_vec())?;
        Ok(())
    }

    /// Loads the user profile
    pub fn load_profile(&self) -> Result<UserProfile> {
        self.profile_store().read_or(|| UserProfile::new(Utc::now()))
    }

    /// Flushes the user profile
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.profile_store().write(profile)
    }

    /// Loads the achievement list
    pub fn load_achievements(&self) -> Result<Vec<Achievement>> {
        self.achievement_store().read_or(Achievement::catalog)
    }

    /// Flushes the achievement list
    pub fn save_achievements(&self, achievements: &[Achievement]) -> Result<()> {
        self.achievement_store().write(&achievements.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure_and_seeds() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.data_dir().is_dir());
        assert!(project.data_dir().join("config.toml").is_file());
        assert!(project.data_dir().join("categories.json").is_file());
        assert!(project.data_dir().join("profile.json").is_file());
        assert!(project.data_dir().join("achievements.json").is_file());

        let board = project.load_board().unwrap();
        assert_eq!(board.categories().len(), 4);
        assert!(board.tasks().is_empty());

        let achievements = project.load_achievements().unwrap();
        assert!(achievements.iter().all(|a| !a.is_unlocked()));
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        let project = Project::init(dir.path()).unwrap();
        let mut board = project.load_board().unwrap();
        board
            .add_category("Errands", "orange", None, 1.0, Utc::now())
            .unwrap();
        project.save_board(&board).unwrap();

        // Re-init must not clobber existing data
        Project::init(dir.path()).unwrap();
        let board = project.load_board().unwrap();
        assert_eq!(board.categories().len(), 5);
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn board_roundtrip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let mut board = project.load_board().unwrap();
        for title in ["One", "Two", "Three"] {
            board
                .add_task(
                    title,
                    CategoryId::slug("work"),
                    Default::default(),
                    Default::default(),
                    10,
                    Utc::now(),
                )
                .unwrap();
        }
        project.save_board(&board).unwrap();

        let loaded = project.load_board().unwrap();
        let titles: Vec<&str> = loaded.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }

    #[test]
    fn profile_roundtrip() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let mut profile = project.load_profile().unwrap();
        profile.xp = 120;
        profile.level = 2;
        project.save_profile(&profile).unwrap();

        assert_eq!(project.load_profile().unwrap(), profile);
    }
}
