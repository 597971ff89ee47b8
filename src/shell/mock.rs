//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] and returns pre-configured
//! results keyed by the rendered command line. Every invocation is recorded
//! for later assertion.
//!
//! # Example
//!
//! ```
//! use choco_adopt::shell::{CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.ok("choco --version", "2.2.2");
//!
//! let result = runner.run("choco", &["--version"]);
//! assert!(result.success);
//! assert_eq!(result.stdout, "2.2.2");
//!
//! // Unscripted commands behave like missing programs
//! assert!(!runner.run("winget", &["--version"]).success);
//! assert_eq!(runner.calls(), ["choco --version", "winget --version"]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use super::command::{display_command, CommandResult, CommandRunner};

/// Mock runner that replays scripted results.
///
/// Results queued for the same command line are returned in order; the last
/// one keeps being returned once the queue is down to it.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<HashMap<String, VecDeque<CommandResult>>>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner with no scripted commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for a command line such as `"choco list --limit-output"`.
    pub fn respond(&self, command_line: &str, result: CommandResult) {
        self.responses
            .borrow_mut()
            .entry(command_line.to_string())
            .or_default()
            .push_back(result);
    }

    /// Queue a successful result with the given stdout.
    pub fn ok(&self, command_line: &str, stdout: &str) {
        self.respond(
            command_line,
            CommandResult::success(stdout, "", Duration::ZERO),
        );
    }

    /// Queue a failed result with the given exit code and stderr.
    pub fn fail(&self, command_line: &str, code: i32, stderr: &str) {
        self.respond(
            command_line,
            CommandResult::failure(Some(code), "", stderr, Duration::ZERO),
        );
    }

    /// All command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Command lines that start with `prefix`.
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Whether a command line was run at least once.
    pub fn was_called(&self, command_line: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command_line)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandResult {
        let line = display_command(program, args);
        self.calls.borrow_mut().push(line.clone());

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&line) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| {
                CommandResult::not_launched(format!("Command not found: {}", program))
            }),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => CommandResult::not_launched(format!("Command not found: {}", program)),
        }
    }
}
