//! User profile: the singleton progression record
//!
//! Holds cumulative XP, the current level, the daily streak and lifetime
//! completion count. Mutated only by the progress engine on completion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// XP required to reach a given level, as a cumulative threshold
pub fn level_threshold(level: u32) -> u64 {
    u64::from(level) * 100
}

/// Singleton progression record for the local user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Current level, starting at 1
    pub level: u32,

    /// Cumulative XP, never decreases
    pub xp: u64,

    /// Cumulative XP threshold for the next level (`level * 100`)
    pub xp_to_next: u64,

    /// Consecutive days with at least one completion
    pub streak: u32,

    /// Lifetime completion count, never decremented
    pub total_tasks: u64,

    /// When the profile was created
    pub joined_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a fresh level-1 profile
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: level_threshold(1),
            streak: 0,
            total_tasks: 0,
            joined_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_profile() {
        let profile = UserProfile::new(Utc::now());

        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.xp_to_next, 100);
        assert_eq!(profile.streak, 0);
        assert_eq!(profile.total_tasks, 0);
    }

    #[test]
    fn thresholds_grow_linearly() {
        assert_eq!(level_threshold(1), 100);
        assert_eq!(level_threshold(2), 200);
        assert_eq!(level_threshold(10), 1000);
    }
}
