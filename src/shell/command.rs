//! External command execution.

use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
            success: false,
        }
    }

    /// Synthetic failure for a program that could not be started.
    pub fn not_launched(message: impl Into<String>) -> Self {
        Self::failure(Some(1), String::new(), message, Duration::ZERO)
    }
}

/// Runs external programs on behalf of the pipeline.
///
/// Implementations never fail: launch errors come back as a failed
/// [`CommandResult`] so every stage handles them the same way as a
/// non-zero exit.
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    fn run(&self, program: &str, args: &[&str]) -> CommandResult;
}

/// Runs commands as real child processes.
///
/// The argument vector is passed straight to the program, no shell is
/// involved. There is no timeout: a hung child hangs the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandResult {
        let start = Instant::now();

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found on PATH", program);
                return CommandResult::not_launched(format!("Command not found: {}", program));
            }
            Err(e) => {
                tracing::debug!("Failed to launch {}: {}", program, e);
                return CommandResult::not_launched(e.to_string());
            }
        };

        let duration = start.elapsed();
        let stdout = decode_lossy(&output.stdout);
        let stderr = decode_lossy(&output.stderr);

        tracing::debug!(
            "{} {:?} exited with {:?} in {:?}",
            program,
            args,
            output.status.code(),
            duration
        );

        if output.status.success() {
            CommandResult::success(stdout, stderr, duration)
        } else {
            CommandResult::failure(output.status.code(), stdout, stderr, duration)
        }
    }
}

/// Decode output as UTF-8, dropping invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Render an argument vector the way an operator would type it.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
