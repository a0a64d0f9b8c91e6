//! Progress engine: XP, levels, streaks and achievement unlocks
//!
//! Runs after every task completion. All functions are pure over the
//! snapshot they are handed; the caller persists the mutated profile and
//! achievement list afterwards.
//!
//! Leveling is cumulative: the threshold for level L is `L * 100` XP, so a
//! single large award can cross several thresholds. One `LevelUp` event is
//! emitted per level crossed.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    level_threshold, Achievement, Category, Difficulty, Priority, Task, UserProfile,
};

/// Completions on a single day required for the `speedster` unlock
const SPEEDSTER_DAILY_TARGET: usize = 10;

/// A notification-worthy outcome of running the engine
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// XP was added to the profile
    XpGained { amount: u64 },

    /// The profile crossed a level threshold
    LevelUp { level: u32 },

    /// An achievement moved to its terminal unlocked state
    AchievementUnlocked {
        id: String,
        title: String,
        xp_reward: u32,
    },
}

/// Effective XP for a completion: base scaled by priority, difficulty and
/// category multipliers, rounded to the nearest integer
///
/// Difficulty multiplies raw, so a difficulty-5 task is worth 5x.
pub fn effective_xp(
    base_xp: u32,
    priority: Priority,
    difficulty: Difficulty,
    category: &Category,
) -> u64 {
    let raw = f64::from(base_xp)
        * priority.multiplier()
        * difficulty.multiplier()
        * category.xp_multiplier;
    raw.round().max(0.0) as u64
}

/// Adds XP to the profile and resolves any level-ups
///
/// Shared by task awards and achievement rewards so both follow the same
/// leveling rule.
pub fn apply_xp(profile: &mut UserProfile, amount: u64, events: &mut Vec<ProgressEvent>) {
    if amount == 0 {
        return;
    }

    profile.xp += amount;
    events.push(ProgressEvent::XpGained { amount });

    while profile.xp >= profile.xp_to_next {
        profile.level += 1;
        profile.xp_to_next = level_threshold(profile.level);
        events.push(ProgressEvent::LevelUp {
            level: profile.level,
        });
    }
}

/// Number of consecutive days with at least one completion, ending on
/// `today` (UTC calendar days)
pub fn current_streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = tasks
        .iter()
        .filter_map(|t| t.completed_at)
        .map(|ts| ts.date_naive())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}

/// Completions whose `completed_at` falls on the given day
fn completions_on(tasks: &[Task], day: NaiveDate) -> usize {
    tasks
        .iter()
        .filter(|t| t.completed_at.map(|ts| ts.date_naive()) == Some(day))
        .count()
}

fn unlock_condition_met(
    achievement: &Achievement,
    profile: &UserProfile,
    tasks: &[Task],
    today: NaiveDate,
) -> bool {
    match achievement.id.as_str() {
        "first-task" => profile.total_tasks == 1,
        "streak-3" => profile.streak >= 3,
        "streak-7" => profile.streak >= 7,
        "speedster" => completions_on(tasks, today) >= SPEEDSTER_DAILY_TARGET,
        _ => false,
    }
}

/// Current progress counter for a still-locked achievement
fn progress_towards(
    achievement: &Achievement,
    profile: &UserProfile,
    tasks: &[Task],
    today: NaiveDate,
) -> u32 {
    let raw = match achievement.id.as_str() {
        "first-task" => profile.total_tasks.min(u64::from(u32::MAX)) as u32,
        "streak-3" | "streak-7" => profile.streak,
        "speedster" => completions_on(tasks, today) as u32,
        _ => 0,
    };
    raw.min(achievement.max_progress)
}

/// Records a task completion: updates streak and lifetime count, awards
/// the task's XP, then evaluates every achievement predicate
///
/// `tasks` is the full task list including the just-completed task.
/// Already-unlocked achievements are skipped, so every unlock fires
/// exactly once.
pub fn record_completion(
    profile: &mut UserProfile,
    achievements: &mut [Achievement],
    tasks: &[Task],
    completed: &Task,
    category: &Category,
    now: DateTime<Utc>,
) -> Vec<ProgressEvent> {
    let today = now.date_naive();
    let mut events = Vec::new();

    profile.streak = current_streak(tasks, today);
    profile.total_tasks += 1;

    apply_xp(
        profile,
        effective_xp(
            completed.xp_value,
            completed.priority,
            completed.difficulty,
            category,
        ),
        &mut events,
    );

    for achievement in achievements.iter_mut() {
        if achievement.is_unlocked() {
            continue;
        }

        if unlock_condition_met(achievement, profile, tasks, today) {
            achievement.unlock(now);
            events.push(ProgressEvent::AchievementUnlocked {
                id: achievement.id.clone(),
                title: achievement.title.clone(),
                xp_reward: achievement.xp_reward,
            });
            apply_xp(profile, u64::from(achievement.xp_reward), &mut events);
        } else {
            achievement.progress = progress_towards(achievement, profile, tasks, today);
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryId;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn category(multiplier: f64) -> Category {
        Category {
            id: CategoryId::slug("work"),
            name: "Work".to_string(),
            color: "blue".to_string(),
            icon: None,
            xp_multiplier: multiplier,
        }
    }

    fn completed_task(completed_at: DateTime<Utc>) -> Task {
        let mut task = Task::new("Done thing", CategoryId::slug("work"), completed_at);
        task.complete(completed_at);
        task
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn effective_xp_combines_all_multipliers() {
        // round(10 * 1.5 * 3 * 1.5) = 68
        let xp = effective_xp(10, Priority::High, Difficulty::new(3), &category(1.5));
        assert_eq!(xp, 68);
    }

    #[test]
    fn effective_xp_neutral_multipliers() {
        let xp = effective_xp(10, Priority::Medium, Difficulty::new(1), &category(1.0));
        assert_eq!(xp, 10);
    }

    #[test]
    fn single_level_up() {
        let mut profile = UserProfile::new(Utc::now());
        profile.xp = 90;

        let mut events = Vec::new();
        apply_xp(&mut profile, 30, &mut events);

        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 120);
        assert_eq!(profile.xp_to_next, 200);
        assert_eq!(
            events,
            vec![
                ProgressEvent::XpGained { amount: 30 },
                ProgressEvent::LevelUp { level: 2 },
            ]
        );
    }

    #[test]
    fn large_award_crosses_multiple_thresholds() {
        let mut profile = UserProfile::new(Utc::now());

        let mut events = Vec::new();
        apply_xp(&mut profile, 999, &mut events);

        // Thresholds 100..900 are crossed, so the profile lands on level 10
        assert_eq!(profile.level, 10);
        assert_eq!(profile.xp, 999);
        assert_eq!(profile.xp_to_next, 1000);

        let level_ups: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::LevelUp { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(level_ups, (2..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn zero_award_is_silent() {
        let mut profile = UserProfile::new(Utc::now());
        let mut events = Vec::new();

        apply_xp(&mut profile, 0, &mut events);

        assert!(events.is_empty());
        assert_eq!(profile.xp, 0);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let today = at(2025, 6, 10, 12);
        let tasks = vec![
            completed_task(today),
            completed_task(today - Duration::days(1)),
            completed_task(today - Duration::days(2)),
            // Gap at day 3
            completed_task(today - Duration::days(4)),
        ];

        assert_eq!(current_streak(&tasks, today.date_naive()), 3);
    }

    #[test]
    fn streak_is_zero_without_completion_today() {
        let today = at(2025, 6, 10, 12);
        let tasks = vec![completed_task(today - Duration::days(1))];

        assert_eq!(current_streak(&tasks, today.date_naive()), 0);
    }

    #[test]
    fn first_task_unlocks_exactly_once() {
        let now = at(2025, 6, 10, 9);
        let mut profile = UserProfile::new(now);
        let mut achievements = Achievement::catalog();
        let task = completed_task(now);
        let tasks = vec![task.clone()];

        let events = record_completion(
            &mut profile,
            &mut achievements,
            &tasks,
            &task,
            &category(1.0),
            now,
        );

        let first = achievements.iter().find(|a| a.id == "first-task").unwrap();
        assert!(first.is_unlocked());
        assert!(events.iter().any(|e| matches!(
            e,
            ProgressEvent::AchievementUnlocked { id, .. } if id == "first-task"
        )));
        // Task XP plus the 25 XP reward
        assert_eq!(profile.xp, 10 + 25);
        assert_eq!(profile.total_tasks, 1);

        // A second completion never re-fires it
        let task2 = completed_task(now + Duration::hours(1));
        let tasks2 = vec![task.clone(), task2.clone()];
        let events2 = record_completion(
            &mut profile,
            &mut achievements,
            &tasks2,
            &task2,
            &category(1.0),
            now + Duration::hours(1),
        );

        assert!(!events2
            .iter()
            .any(|e| matches!(e, ProgressEvent::AchievementUnlocked { .. })));
        assert_eq!(profile.total_tasks, 2);
    }

    #[test]
    fn streak_achievements_unlock_at_thresholds() {
        let now = at(2025, 6, 10, 9);
        let mut profile = UserProfile::new(now);
        let mut achievements = Achievement::catalog();

        // Completions on today and the two prior days
        let task = completed_task(now);
        let tasks = vec![
            task.clone(),
            completed_task(now - Duration::days(1)),
            completed_task(now - Duration::days(2)),
        ];

        record_completion(
            &mut profile,
            &mut achievements,
            &tasks,
            &task,
            &category(1.0),
            now,
        );

        assert_eq!(profile.streak, 3);
        let streak3 = achievements.iter().find(|a| a.id == "streak-3").unwrap();
        let streak7 = achievements.iter().find(|a| a.id == "streak-7").unwrap();
        assert!(streak3.is_unlocked());
        assert!(!streak7.is_unlocked());
        // Locked achievements still track progress
        assert_eq!(streak7.progress, 3);
    }

    #[test]
    fn speedster_unlocks_on_tenth_completion_of_the_day() {
        let now = at(2025, 6, 10, 20);
        let mut profile = UserProfile::new(now);
        let mut achievements = Achievement::catalog();

        let mut tasks: Vec<Task> = (0..9)
            .map(|i| completed_task(at(2025, 6, 10, 8) + Duration::minutes(i)))
            .collect();
        let tenth = completed_task(now);
        tasks.push(tenth.clone());

        record_completion(
            &mut profile,
            &mut achievements,
            &tasks,
            &tenth,
            &category(1.0),
            now,
        );

        let speedster = achievements.iter().find(|a| a.id == "speedster").unwrap();
        assert!(speedster.is_unlocked());
        assert_eq!(speedster.progress, speedster.max_progress);
    }

    #[test]
    fn achievement_reward_can_cascade_level_ups() {
        let now = at(2025, 6, 10, 9);
        let mut profile = UserProfile::new(now);
        profile.xp = 95;
        let mut achievements = Achievement::catalog();
        let task = completed_task(now);
        let tasks = vec![task.clone()];

        // 10 task XP crosses level 1; the 25 reward lands after it
        let events = record_completion(
            &mut profile,
            &mut achievements,
            &tasks,
            &task,
            &category(1.0),
            now,
        );

        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 95 + 10 + 25);
        assert!(events.contains(&ProgressEvent::LevelUp { level: 2 }));
    }

    proptest! {
        /// Leveling invariant: after any sequence of awards the level is
        /// the unique L with threshold(L-1) <= xp < threshold(L), and
        /// xp_to_next always matches the current level.
        #[test]
        fn leveling_invariant_holds(awards in prop::collection::vec(0u64..5_000, 0..20)) {
            let mut profile = UserProfile::new(Utc::now());
            let mut events = Vec::new();
            let mut previous_level = profile.level;

            for amount in awards {
                apply_xp(&mut profile, amount, &mut events);

                prop_assert!(profile.level >= previous_level);
                prop_assert_eq!(profile.xp_to_next, level_threshold(profile.level));
                prop_assert!(profile.xp < profile.xp_to_next);
                if profile.level > 1 {
                    prop_assert!(profile.xp >= level_threshold(profile.level - 1));
                }
                previous_level = profile.level;
            }
        }
    }
}
