//! JSON snapshot storage for single-key records
//!
//! Categories, the user profile and the achievement list are each one
//! JSON document per logical key (`categories.json`, `profile.json`,
//! `achievements.json`). Reads fall back to a seeded default when the
//! file is missing; writes are locked and atomic, same as the task store.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One persisted key as a JSON file
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for a key file inside the project data directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for a named key under `.taskflow/`
    pub fn for_key(project_root: &Path, key: &str) -> Self {
        Self::new(project_root.join(".taskflow").join(format!("{}.json", key)))
    }

    /// Returns the path to the key file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the key has been written
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the value, or produces the default when the key is missing
    pub fn read_or<T, F>(&self, default: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        if !self.path.exists() {
            return Ok(default());
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        file.lock_shared()
            .with_context(|| format!("Failed to lock {}", self.path.display()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Atomically replaces the value
    pub fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to lock {}", temp_path.display()))?;

            let content =
                serde_json::to_string_pretty(value).context("Failed to serialize value")?;
            (&file)
                .write_all(content.as_bytes())
                .with_context(|| format!("Failed to write {}", temp_path.display()))?;
            (&file).flush().ok();
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, UserProfile};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn missing_key_yields_default() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::for_key(dir.path(), "categories");

        let categories: Vec<Category> = store.read_or(Category::starter_catalog).unwrap();
        assert_eq!(categories.len(), 4);
        assert!(!store.exists());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::for_key(dir.path(), "profile");

        let mut profile = UserProfile::new(Utc::now());
        profile.xp = 250;
        profile.level = 3;
        store.write(&profile).unwrap();

        let loaded: UserProfile = store.read_or(|| UserProfile::new(Utc::now())).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn write_is_atomic() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::for_key(dir.path(), "profile");

        store.write(&UserProfile::new(Utc::now())).unwrap();
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::for_key(dir.path(), "profile");

        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let result: Result<UserProfile> = store.read_or(|| UserProfile::new(Utc::now()));
        assert!(result.is_err());
    }
}
