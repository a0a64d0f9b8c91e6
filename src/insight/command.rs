//! Subprocess-backed text generator
//!
//! The insight service is whatever command the user configures (an LLM
//! CLI, a local model wrapper, a script). The prompt goes to its stdin,
//! the response comes from its stdout. The model name and JSON-mode flag
//! are passed through the environment so arbitrary commands can ignore
//! them.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{GenerationRequest, ServiceError, TextGenerator};

/// Generator that shells out to a configured command
pub struct CommandGenerator {
    command: String,
}

impl CommandGenerator {
    /// Creates a generator from a configured command line, if any
    pub fn from_config(command: Option<&str>) -> Result<Self, ServiceError> {
        match command {
            Some(cmd) if !cmd.trim().is_empty() => Ok(Self {
                command: cmd.to_string(),
            }),
            _ => Err(ServiceError::NotConfigured),
        }
    }
}

impl TextGenerator for CommandGenerator {
    fn generate_text(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("TASKFLOW_MODEL", &request.model)
            .env("TASKFLOW_JSON_MODE", if request.json_mode { "1" } else { "0" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ServiceError::Spawn(e.to_string()))?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(request.prompt.as_bytes())
                .map_err(|e| ServiceError::Spawn(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ServiceError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ServiceError::Failed(if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            }));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        if text.trim().is_empty() {
            return Err(ServiceError::Empty);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "hello".to_string(),
            model: "test-model".to_string(),
            json_mode: false,
        }
    }

    #[test]
    fn missing_config_is_not_configured() {
        assert!(matches!(
            CommandGenerator::from_config(None),
            Err(ServiceError::NotConfigured)
        ));
        assert!(matches!(
            CommandGenerator::from_config(Some("   ")),
            Err(ServiceError::NotConfigured)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn echoes_stdin_through_cat() {
        let generator = CommandGenerator::from_config(Some("cat")).unwrap();
        let text = generator.generate_text(&request()).unwrap();
        assert_eq!(text, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_failure() {
        let generator = CommandGenerator::from_config(Some("echo oops >&2; false")).unwrap();
        assert!(matches!(
            generator.generate_text(&request()),
            Err(ServiceError::Failed(msg)) if msg == "oops"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn empty_output_is_an_error() {
        let generator = CommandGenerator::from_config(Some("true")).unwrap();
        assert!(matches!(
            generator.generate_text(&request()),
            Err(ServiceError::Empty)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn model_is_passed_through_env() {
        let generator =
            CommandGenerator::from_config(Some("printf %s \"$TASKFLOW_MODEL\"")).unwrap();
        let text = generator.generate_text(&request()).unwrap();
        assert_eq!(text, "test-model");
    }
}
