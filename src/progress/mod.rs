//! Progress engine and derived statistics
//!
//! Pure computation over board snapshots: XP awards, leveling, streaks,
//! achievement unlocks, and the read-only stats the UI surfaces.

mod engine;
mod stats;

pub use engine::{
    apply_xp, current_streak, effective_xp, record_completion, ProgressEvent,
};
pub use stats::{
    average_completion_minutes, board_stats, completion_rate, most_productive_category,
    peak_hours, BoardStats, CategoryStats,
};
