//! Opaque identifiers for tasks and categories
//!
//! ID Format:
//! - Task IDs: `t-{7-char-hash}` (e.g., `t-9d3e5f2`)
//! - Category IDs: `c-{7-char-hash}`, or a lowercase slug for the
//!   built-in starter categories (e.g., `work`)
//!
//! Hash is derived from title + creation timestamp, ensuring uniqueness.
//! Same title at different times produces different IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected 't-{{7-char-hash}}', got '{0}'")]
    InvalidTaskId(String),

    #[error("Invalid category ID: expected 'c-{{7-char-hash}}' or a slug, got '{0}'")]
    InvalidCategoryId(String),
}

/// Generates a 7-character hash from a label and timestamp
fn generate_hash(label: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", label, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Task ID in the format `t-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    hash: String,
}

impl TaskId {
    /// Creates a new task ID from title and creation timestamp
    pub fn new(title: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(title, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t-{}", self.hash)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hash = s
            .strip_prefix("t-")
            .ok_or_else(|| IdError::InvalidTaskId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidTaskId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// Category ID - either a generated `c-{hash}` or a built-in slug
///
/// The starter catalog (`work`, `personal`, ...) uses human-readable slugs
/// so they stay stable across installs; user-created categories get hashed
/// IDs so names never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId {
    raw: String,
}

impl CategoryId {
    /// Creates a new generated category ID from name and creation timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            raw: format!("c-{}", generate_hash(name, timestamp)),
        }
    }

    /// Creates a category ID from a built-in slug
    pub fn slug(slug: &str) -> Self {
        Self {
            raw: slug.to_string(),
        }
    }

    /// Returns the raw ID string
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for CategoryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hash) = s.strip_prefix("c-") {
            if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(IdError::InvalidCategoryId(s.to_string()));
            }
            return Ok(Self { raw: s.to_string() });
        }

        // Slug form: non-empty lowercase alphanumeric with dashes
        if s.is_empty()
            || !s
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(IdError::InvalidCategoryId(s.to_string()));
        }

        Ok(Self { raw: s.to_string() })
    }
}

impl TryFrom<String> for CategoryId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.to_string()
    }
}
