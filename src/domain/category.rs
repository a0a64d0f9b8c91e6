//! Category domain model
//!
//! Categories partition tasks and contribute an XP multiplier. They are
//! immutable after creation; at least one category always exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A task category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name (non-empty, trimmed)
    pub name: String,

    /// Color token for display surfaces
    pub color: String,

    /// Optional display glyph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// XP multiplier applied to completions in this category
    #[serde(default = "default_multiplier")]
    pub xp_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Category {
    /// Creates a new category with a generated ID
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon: Option<String>,
        xp_multiplier: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::new(&name, now),
            name,
            color: color.into(),
            icon,
            xp_multiplier,
        }
    }

    fn builtin(slug: &str, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: CategoryId::slug(slug),
            name: name.to_string(),
            color: color.to_string(),
            icon: Some(icon.to_string()),
            xp_multiplier: 1.0,
        }
    }

    /// The starter catalog seeded into every new project
    pub fn starter_catalog() -> Vec<Category> {
        vec![
            Category::builtin("work", "Work", "blue", "briefcase"),
            Category::builtin("personal", "Personal", "green", "user"),
            Category::builtin("shopping", "Shopping", "purple", "cart"),
            Category::builtin("health", "Health", "red", "heart"),
        ]
    }
}
