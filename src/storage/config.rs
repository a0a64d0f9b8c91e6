//! Configuration handling for TaskFlow
//!
//! Configuration is stored in `.taskflow/config.toml` (project) and
//! `~/.config/taskflow/config.toml` (global). The project file carries
//! the preference keys the app persists: theme, sound, the auto-insight
//! toggle and the insight service settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for the external insight service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Command to run for text generation (prompt on stdin, text on stdout)
    pub command: Option<String>,

    /// Model identifier passed through to the service
    pub model: String,

    /// Ask the service for JSON output
    pub json_mode: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            command: None,
            model: "default".to_string(),
            json_mode: true,
        }
    }
}

/// Project-level configuration and preference keys
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Generate an insight automatically after `task done`
    pub auto_insight: bool,

    /// Display theme token
    pub theme: String,

    /// Completion sound toggle (display surfaces only)
    pub sound: bool,

    /// Insight service settings
    pub insight: InsightConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            auto_insight: false,
            theme: "light".to_string(),
            sound: true,
            insight: InsightConfig::default(),
        }
    }
}

/// Preferred output format, used when `--format` is not given
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreferredFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: PreferredFormat,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskflow", "taskflow").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".taskflow").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")
    }

    /// Finds the project root by looking for a `.taskflow/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".taskflow").is_dir() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ProjectConfig::default();

        assert!(!config.auto_insight);
        assert_eq!(config.theme, "light");
        assert!(config.sound);
        assert!(config.insight.command.is_none());
        assert!(config.insight.json_mode);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
auto_insight = true
theme = "dark"
sound = false

[insight]
command = "my-llm --quiet"
model = "large"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(config.auto_insight);
        assert_eq!(config.theme, "dark");
        assert!(!config.sound);
        assert_eq!(config.insight.command.as_deref(), Some("my-llm --quiet"));
        assert_eq!(config.insight.model, "large");
        // Unspecified key keeps its default
        assert!(config.insight.json_mode);
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"").unwrap();
        assert_eq!(config.default_format, PreferredFormat::Json);
    }

    #[test]
    fn for_project_records_the_root() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".taskflow")).unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert_eq!(config.project_root.as_deref(), Some(dir.path()));
        assert!(!config.project.auto_insight);
    }
}
