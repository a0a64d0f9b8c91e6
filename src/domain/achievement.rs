//! Achievement catalog and unlock state
//!
//! The catalog is fixed and seeded at init. Unlocking is terminal: once
//! `unlocked_at` is set it is never cleared, and re-evaluating an already
//! unlocked achievement is a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Achievement rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Returns a display label for the rarity
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// A one-shot unlockable milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier (e.g. `first-task`)
    pub id: String,

    /// Display title
    pub title: String,

    /// What the player did to earn it
    pub description: String,

    /// Rarity tier
    pub rarity: Rarity,

    /// Progress target
    pub max_progress: u32,

    /// Current progress towards `max_progress`
    pub progress: u32,

    /// When the achievement was unlocked, if ever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,

    /// XP granted on unlock
    pub xp_reward: u32,
}

impl Achievement {
    fn locked(
        id: &str,
        title: &str,
        description: &str,
        rarity: Rarity,
        max_progress: u32,
        xp_reward: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            rarity,
            max_progress,
            progress: 0,
            unlocked_at: None,
            xp_reward,
        }
    }

    /// Returns true once the achievement has been unlocked
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    /// Marks the achievement unlocked; no-op when already unlocked
    pub fn unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_unlocked() {
            return false;
        }
        self.progress = self.max_progress;
        self.unlocked_at = Some(now);
        true
    }

    /// The fixed catalog seeded into every new project, all locked
    pub fn catalog() -> Vec<Achievement> {
        vec![
            Achievement::locked(
                "first-task",
                "First Steps",
                "Complete your first task",
                Rarity::Common,
                1,
                25,
            ),
            Achievement::locked(
                "streak-3",
                "Warming Up",
                "Keep a 3-day completion streak",
                Rarity::Rare,
                3,
                50,
            ),
            Achievement::locked(
                "streak-7",
                "On Fire",
                "Keep a 7-day completion streak",
                Rarity::Epic,
                7,
                150,
            ),
            Achievement::locked(
                "speedster",
                "Speedster",
                "Complete 10 tasks in a single day",
                Rarity::Legendary,
                10,
                300,
            ),
        ]
    }
}
