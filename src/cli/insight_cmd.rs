//! AI insight command
//!
//! Service failures are advisory: they print an error line and the
//! command still exits successfully, leaving every store untouched.

use anyhow::Result;
use chrono::Utc;

use super::output::Output;
use crate::insight::{
    build_prompt, parse_insights, CommandGenerator, GenerationRequest, Insight, TextGenerator,
};
use crate::progress::board_stats;
use crate::storage::Project;

/// Runs the `insight` command
pub fn run(output: &Output, model: Option<&str>, raw: bool) -> Result<()> {
    let project = Project::open_current()?;
    generate(output, &project, model, raw)
}

/// Generates insights for an already-opened project
///
/// Shared with `task done --auto-insight` flows; fails soft on any
/// [`crate::insight::ServiceError`].
pub fn generate(output: &Output, project: &Project, model: Option<&str>, raw: bool) -> Result<()> {
    let config = &project.config().project.insight;

    let board = project.load_board()?;
    let profile = project.load_profile()?;
    let stats = board_stats(board.tasks(), board.categories());

    let request = GenerationRequest {
        prompt: build_prompt(&stats, &profile, config.json_mode),
        model: model.unwrap_or(&config.model).to_string(),
        json_mode: config.json_mode,
    };
    output.verbose_ctx("insight", &format!("model={}", request.model));

    let generator = match CommandGenerator::from_config(config.command.as_deref()) {
        Ok(generator) => generator,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(());
        }
    };

    let response = match generator.generate_text(&request) {
        Ok(response) => response,
        Err(e) => {
            output.error(&format!("Insight generation failed: {}", e));
            return Ok(());
        }
    };

    if raw {
        print!("{}", response);
        return Ok(());
    }

    let lines = parse_insights(&response);
    if lines.is_empty() {
        output.error("Insight service returned nothing usable");
        return Ok(());
    }

    let log = project.insight_log();
    let now = Utc::now();
    for text in &lines {
        // Logging the insight is best-effort display state
        let _ = log.append(&Insight {
            text: text.clone(),
            model: request.model.clone(),
            generated_at: now,
        });
    }

    if output.is_json() {
        output.data(&lines);
    } else {
        for text in &lines {
            println!("- {}", text);
        }
    }

    Ok(())
}
