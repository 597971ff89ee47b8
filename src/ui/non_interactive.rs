//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::AdoptTheme;
use super::{
    parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Environment prefix for prompt answers, e.g. `CHOCO_ADOPT_PROMPT_REGISTRATION_MODE=export`.
pub const PROMPT_ENV_PREFIX: &str = "CHOCO_ADOPT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `CHOCO_ADOPT_PROMPT_<KEY>` overrides, then from
/// the prompt's default. Nothing is read from stdin.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    theme: AdoptTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            theme: AdoptTheme::plain(),
        }
    }

    fn override_for(&self, key: &str) -> Option<&String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase());
        self.env_overrides.get(&env_key)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn summary(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let answer = self.override_for(&prompt.key).cloned();

        let result = match &prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(
                answer
                    .or_else(|| prompt.default.clone())
                    .is_some_and(|a| parse_confirm(&a)),
            ),
            PromptType::Select { options } => {
                let valid = |candidate: &String| options.iter().any(|o| &o.value == candidate);
                let chosen = answer
                    .filter(valid)
                    .or_else(|| prompt.default.clone().filter(valid))
                    .or_else(|| options.first().map(|o| o.value.clone()))
                    .unwrap_or_default();
                PromptResult::String(chosen)
            }
        };

        tracing::debug!(
            "Answered prompt '{}' non-interactively with {:?}",
            prompt.key,
            result
        );
        if self.mode.shows_status() {
            println!("{} {}", prompt.question, result.as_string());
        }
        Ok(result)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("{}", message);
        }
        Box::new(NonInteractiveSpinner {
            show: self.mode.shows_status(),
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}", self.theme.format_header(title));
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("   {}", hint);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_progress() {
            println!("Progress: {}/{} apps processed...", current, total);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints the final status line only.
struct NonInteractiveSpinner {
    show: bool,
    theme: AdoptTheme,
}

impl SpinnerHandle for NonInteractiveSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn finish_clear(&mut self) {}
}
