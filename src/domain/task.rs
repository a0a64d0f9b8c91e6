//! Task domain model
//!
//! Tasks are the unit of work. Completion drives the progress engine, so
//! the gamification fields (priority, difficulty, xp_value) and their
//! defaults are all defined here, in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, TaskId};

/// Base XP granted for a completion before multipliers apply
pub const DEFAULT_XP_VALUE: u32 = 10;

/// Task priority, scaling the XP earned on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// XP multiplier applied on completion
    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::Low => 0.8,
            Priority::Medium => 1.0,
            Priority::High => 1.5,
            Priority::Urgent => 2.0,
        }
    }

    /// Returns a display label for the priority
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Task difficulty on a 1-5 scale, used raw as an XP multiplier
///
/// Out-of-range values are clamped at construction and deserialization so
/// a hand-edited data file cannot produce a zero or runaway multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a difficulty, clamping into the 1-5 range
    pub fn new(raw: u8) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the raw 1-5 value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// XP multiplier: the raw difficulty value itself
    pub fn multiplier(&self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

/// A task owned by exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable title (non-empty, trimmed)
    pub title: String,

    /// Whether the task is done
    pub completed: bool,

    /// The category this task belongs to
    pub category_id: CategoryId,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was completed; set iff `completed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Difficulty on a 1-5 scale
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Base XP awarded on completion, before multipliers
    #[serde(default = "default_xp_value")]
    pub xp_value: u32,
}

fn default_xp_value() -> u32 {
    DEFAULT_XP_VALUE
}

impl Task {
    /// Creates a new pending task with default gamification fields
    pub fn new(title: impl Into<String>, category_id: CategoryId, now: DateTime<Utc>) -> Self {
        let title = title.into();
        Self {
            id: TaskId::new(&title, now),
            title,
            completed: false,
            category_id,
            created_at: now,
            completed_at: None,
            priority: Priority::default(),
            difficulty: Difficulty::default(),
            xp_value: DEFAULT_XP_VALUE,
        }
    }

    /// Marks the task completed at the given time
    pub fn complete(&mut self, now: DateTime<Utc>) {
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(now);
        }
    }

    /// Returns the task to the pending state
    pub fn reopen(&mut self) {
        if self.completed {
            self.completed = false;
            self.completed_at = None;
        }
    }

    /// Flips completion state, keeping `completed_at` in sync
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.completed {
            self.reopen();
        } else {
            self.complete(now);
        }
    }

    /// Minutes from creation to completion, when both ends are known
    pub fn completion_minutes(&self) -> Option<f64> {
        self.completed_at
            .map(|done| (done - self.created_at).num_seconds() as f64 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task() -> Task {
        Task::new("Water the plants", CategoryId::slug("personal"), Utc::now())
    }

    #[test]
    fn new_task_is_pending_with_defaults() {
        let task = make_task();

        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.difficulty.value(), 1);
        assert_eq!(task.xp_value, DEFAULT_XP_VALUE);
    }

    #[test]
    fn completed_iff_completed_at_set() {
        let mut task = make_task();

        task.toggle(Utc::now());
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        task.toggle(Utc::now());
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn complete_is_idempotent() {
        let mut task = make_task();
        let first = Utc::now();

        task.complete(first);
        let stamp = task.completed_at;

        task.complete(first + chrono::Duration::hours(1));
        assert_eq!(task.completed_at, stamp);
    }

    #[test]
    fn priority_multipliers() {
        assert_eq!(Priority::Low.multiplier(), 0.8);
        assert_eq!(Priority::Medium.multiplier(), 1.0);
        assert_eq!(Priority::High.multiplier(), 1.5);
        assert_eq!(Priority::Urgent.multiplier(), 2.0);
    }

    #[test]
    fn difficulty_clamps() {
        assert_eq!(Difficulty::new(0).value(), 1);
        assert_eq!(Difficulty::new(3).value(), 3);
        assert_eq!(Difficulty::new(99).value(), 5);
    }

    #[test]
    fn difficulty_clamps_on_deserialize() {
        let d: Difficulty = serde_json::from_str("42").unwrap();
        assert_eq!(d.value(), 5);
    }

    #[test]
    fn completion_minutes() {
        let mut task = make_task();
        assert!(task.completion_minutes().is_none());

        task.complete(task.created_at + chrono::Duration::minutes(30));
        assert_eq!(task.completion_minutes(), Some(30.0));
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        // A record written by an older revision without gamification fields
        let json = r#"{"id":"t-1234abc","title":"Old task","completed":false,"category_id":"work","created_at":"2025-01-01T00:00:00Z"}"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.difficulty.value(), 1);
        assert_eq!(task.xp_value, DEFAULT_XP_VALUE);
    }

    #[test]
    fn serde_roundtrip() {
        let mut task = make_task();
        task.priority = Priority::Urgent;
        task.difficulty = Difficulty::new(4);
        task.complete(Utc::now());

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, task);
    }
}
