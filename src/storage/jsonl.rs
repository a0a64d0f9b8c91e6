//! JSONL storage for tasks and the insight log
//!
//! Tasks live in `.taskflow/tasks.jsonl`, one JSON object per line. File
//! order is list order: the board's encounter-order semantics (category
//! reassignment, stat tie breaking) depend on it, so reads and writes
//! both preserve it. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::Task;
use crate::insight::Insight;

/// Store for task data in JSONL format, order-preserving
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a new task store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".taskflow").join("tasks.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tasks in file order
    pub fn read_all(&self) -> Result<Vec<Task>> {
        read_lines(&self.path)
    }

    /// Writes all tasks, preserving list order (full rewrite)
    pub fn write_all(&self, tasks: &[Task]) -> Result<()> {
        write_lines(&self.path, tasks)
    }
}

/// Append-only log of generated insights (`.taskflow/insights.jsonl`)
pub struct InsightLog {
    path: PathBuf,
}

impl InsightLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".taskflow").join("insights.jsonl"))
    }

    /// Appends one insight record
    pub fn append(&self, insight: &Insight) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open insight log: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on insight log")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(insight).context("Failed to serialize insight")?;
        writeln!(writer, "{}", line).context("Failed to write insight")?;
        writer.flush().context("Failed to flush insight log")?;

        Ok(())
    }

    /// Reads the whole log in append order
    pub fn read_all(&self) -> Result<Vec<Insight>> {
        read_lines(&self.path)
    }
}

/// Reads a JSONL file into a vec, preserving line order
fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store: {}", path.display()))?;

    file.lock_shared()
        .context("Failed to acquire read lock")?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: T = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse record at line {}", line_num + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Atomically rewrites a JSONL file from a slice, one record per line
fn write_lines<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("jsonl.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock")?;

        let mut writer = BufWriter::new(&file);
        for record in records {
            let line = serde_json::to_string(record).context("Failed to serialize record")?;
            writeln!(writer, "{}", line).context("Failed to write record")?;
        }
        writer.flush().context("Failed to flush store")?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_task(title: &str) -> Task {
        Task::new(title, CategoryId::slug("work"), Utc::now())
    }

    #[test]
    fn read_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.jsonl"));

        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn write_and_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.jsonl"));

        let tasks = vec![make_task("First"), make_task("Second"), make_task("Third")];
        store.write_all(&tasks).unwrap();

        let loaded = store.read_all().unwrap();
        let titles: Vec<&str> = loaded.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn rewrite_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.jsonl"));

        store.write_all(&[make_task("Old")]).unwrap();
        store.write_all(&[make_task("New")]).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "New");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("tasks.jsonl"));

        store.write_all(&[make_task("Deep")]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.jsonl"));

        store.write_all(&[make_task("One")]).unwrap();
        assert!(!store.path().with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn insight_log_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let log = InsightLog::new(dir.path().join("insights.jsonl"));

        for text in ["tip one", "tip two"] {
            log.append(&Insight {
                text: text.to_string(),
                model: "default".to_string(),
                generated_at: Utc::now(),
            })
            .unwrap();
        }

        let loaded = log.read_all().unwrap();
        let texts: Vec<&str> = loaded.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["tip one", "tip two"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.jsonl");

        let task = make_task("Kept");
        let line = serde_json::to_string(&task).unwrap();
        fs::write(&path, format!("{}\n\n\n", line)).unwrap();

        let loaded = TaskStore::new(&path).read_all().unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
