//! Domain models for TaskFlow
//!
//! Contains the core business logic without any I/O concerns.

mod achievement;
mod board;
mod category;
mod id;
mod profile;
mod task;

pub use achievement::{Achievement, Rarity};
pub use board::{Board, BoardError};
pub use category::Category;
pub use id::{CategoryId, IdError, TaskId};
pub use profile::{level_threshold, UserProfile};
pub use task::{Difficulty, Priority, Task, DEFAULT_XP_VALUE};
