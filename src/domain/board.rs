//! The board: ordered task and category collections
//!
//! All mutations are synchronous snapshot-replace operations over plain
//! `Vec`s; list order is significant (category reassignment picks the
//! first remaining category, stats break ties by encounter order). The
//! board owns no I/O; callers load it from storage and flush it back
//! after every mutation.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::category::Category;
use super::id::{CategoryId, TaskId};
use super::task::{Difficulty, Priority, Task};

#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Cannot delete the last category")]
    LastCategory,

    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),

    #[error("XP multiplier must be a positive finite number, got {0}")]
    InvalidMultiplier(f64),
}

/// In-memory task and category state
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl Board {
    /// Builds a board from loaded state
    ///
    /// The category list must be non-empty; storage seeds the starter
    /// catalog before this is ever called.
    pub fn new(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        debug_assert!(!categories.is_empty());
        Self { tasks, categories }
    }

    /// All tasks in list order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All categories in list order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a task by ID
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Looks up a category by ID
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Pending tasks in list order
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks in list order
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Adds a task with the given title and category
    ///
    /// The title is trimmed first; a blank title or an unknown category is
    /// rejected with no state change.
    pub fn add_task(
        &mut self,
        title: &str,
        category_id: CategoryId,
        priority: Priority,
        difficulty: Difficulty,
        xp_value: u32,
        now: DateTime<Utc>,
    ) -> Result<&Task, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if self.category(&category_id).is_none() {
            return Err(BoardError::UnknownCategory(category_id));
        }

        let mut task = Task::new(title, category_id, now);
        task.priority = priority;
        task.difficulty = difficulty;
        task.xp_value = xp_value;

        let idx = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[idx])
    }

    /// Flips a task's completion state, keeping `completed_at` in sync
    ///
    /// Returns the task after the flip, or `None` when the ID is absent
    /// (a silent no-op per the error taxonomy).
    pub fn toggle_task(&mut self, id: &TaskId, now: DateTime<Utc>) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        task.toggle(now);
        Some(task)
    }

    /// Removes a task; returns false when the ID is absent
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        self.tasks.len() != before
    }

    /// Moves a task to another category
    ///
    /// Returns `Ok(false)` when the task ID is absent.
    pub fn move_task(&mut self, id: &TaskId, category_id: CategoryId) -> Result<bool, BoardError> {
        if self.category(&category_id).is_none() {
            return Err(BoardError::UnknownCategory(category_id));
        }

        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(task) => {
                task.category_id = category_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Adds a category with a generated ID
    pub fn add_category(
        &mut self,
        name: &str,
        color: &str,
        icon: Option<String>,
        xp_multiplier: f64,
        now: DateTime<Utc>,
    ) -> Result<&Category, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyName);
        }
        if !xp_multiplier.is_finite() || xp_multiplier <= 0.0 {
            return Err(BoardError::InvalidMultiplier(xp_multiplier));
        }

        let idx = self.categories.len();
        self.categories
            .push(Category::new(name, color, icon, xp_multiplier, now));
        Ok(&self.categories[idx])
    }

    /// Deletes a category, reassigning its tasks
    ///
    /// Deleting the last remaining category is rejected with no state
    /// change. Otherwise every task in the deleted category moves to the
    /// first remaining category in current list order. Returns the number
    /// of reassigned tasks.
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<usize, BoardError> {
        if self.category(id).is_none() {
            return Err(BoardError::UnknownCategory(id.clone()));
        }
        if self.categories.len() <= 1 {
            return Err(BoardError::LastCategory);
        }

        self.categories.retain(|c| &c.id != id);
        let fallback = self.categories[0].id.clone();

        let mut reassigned = 0;
        for task in self.tasks.iter_mut().filter(|t| &t.category_id == id) {
            task.category_id = fallback.clone();
            reassigned += 1;
        }

        Ok(reassigned)
    }
}
