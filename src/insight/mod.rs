//! AI insight generation
//!
//! The text-generation service is opaque: callers hand it a prompt and get
//! back a string, or a [`ServiceError`]. Everything here is advisory —
//! failures surface as a notification and never touch store state. No
//! retry, no timeout.

mod command;
mod prompt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use command::CommandGenerator;
pub use prompt::build_prompt;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No insight command configured. Set [insight].command in .taskflow/config.toml")]
    NotConfigured,

    #[error("Failed to run insight command: {0}")]
    Spawn(String),

    #[error("Insight command exited with an error: {0}")]
    Failed(String),

    #[error("Insight service returned an empty response")]
    Empty,
}

/// A request to the external text-generation service
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// The full prompt text
    pub prompt: String,

    /// Model identifier, passed through opaquely
    pub model: String,

    /// Ask the service for a JSON array of insight strings
    pub json_mode: bool,
}

/// Opaque text-generation endpoint
pub trait TextGenerator {
    fn generate_text(&self, request: &GenerationRequest) -> Result<String, ServiceError>;
}

/// A generated insight line, as persisted to the display-only log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub model: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Extracts insight lines from a service response, failing soft
///
/// Accepted shapes when JSON mode was requested: a JSON string array, an
/// object with an `insights` array, or a fenced code block containing
/// either. Anything else degrades to non-empty plain-text lines, so a
/// malformed response never becomes an error.
pub fn parse_insights(response: &str) -> Vec<String> {
    let trimmed = strip_code_fence(response.trim());

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let array = match &value {
            serde_json::Value::Array(items) => Some(items),
            serde_json::Value::Object(map) => map.get("insights").and_then(|v| v.as_array()),
            _ => None,
        };

        if let Some(items) = array {
            let lines: Vec<String> = items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !lines.is_empty() {
                return lines;
            }
        }
    }

    // Plain-text fallback
    trimmed
        .lines()
        .map(|l| l.trim_start_matches(['-', '*', ' ']).trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

/// Strips a surrounding markdown code fence, if present
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").map(str::trim).unwrap_or(text)
}
