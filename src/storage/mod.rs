//! # Storage Layer
//!
//! Persistence for TaskFlow, one file per logical key under `.taskflow/`:
//!
//! | Key | Format | Location |
//! |-----|--------|----------|
//! | tasks | JSONL (one JSON per line, order significant) | `.taskflow/tasks.jsonl` |
//! | categories | JSON array | `.taskflow/categories.json` |
//! | userProfile | JSON object | `.taskflow/profile.json` |
//! | achievements | JSON array | `.taskflow/achievements.json` |
//! | insights | JSONL append-only log | `.taskflow/insights.jsonl` |
//! | prefs | TOML | `.taskflow/config.toml` |
//!
//! All writes take exclusive `fs2` locks and go through a temp file plus
//! atomic rename; reads take shared locks. Missing keys fall back to
//! seeded defaults so partial snapshots always load.

mod config;
mod jsonl;
mod project;
mod snapshot;

pub use config::{Config, ConfigError, GlobalConfig, InsightConfig, PreferredFormat, ProjectConfig};
pub use jsonl::{InsightLog, TaskStore};
pub use project::{Project, ProjectError};
pub use snapshot::SnapshotStore;
