//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project lifecycle | `init` |
//! | Task | Work item management | `task add`, `task done`, `task list` |
//! | Category | Category management | `category add`, `category delete` |
//! | Query | Derived state | `status`, `profile`, `achievements` |
//! | Insight | AI integration | `insight`, `insight --raw` |
//!
//! All commands support `--format text|json` and `--verbose`. Call
//! [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod category;
mod insight_cmd;
mod output;
mod query;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
