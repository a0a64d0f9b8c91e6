//! TaskFlow - a local-first gamified task manager
//!
//! Tasks live in categories; completing them earns XP scaled by priority,
//! difficulty and category multipliers, drives level and streak
//! progression, and unlocks achievements. An optional external service
//! generates productivity insights from the derived statistics.

pub mod cli;
pub mod domain;
pub mod insight;
pub mod progress;
pub mod storage;

pub use domain::{Achievement, Board, Category, CategoryId, Task, TaskId, UserProfile};
