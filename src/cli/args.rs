//! CLI argument definitions.
//!
//! The tool has a single entry point: with no arguments it runs the whole
//! pipeline. The flags only adjust settings and output.

use clap::Parser;
use std::path::PathBuf;

use crate::ui::OutputMode;

/// Adopt installed programs that neither WinGet nor Chocolatey manage.
#[derive(Debug, Parser)]
#[command(name = "choco-adopt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML settings file
    #[arg(short, long, env = "CHOCO_ADOPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output, including install command output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--quiet` and `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_with_defaults() {
        let cli = Cli::try_parse_from(["choco-adopt"]).unwrap();
        assert!(cli.config.is_none() || std::env::var("CHOCO_ADOPT_CONFIG").is_ok());
        assert_eq!(cli.output_mode(), OutputMode::Normal);
        assert!(!cli.debug);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "choco-adopt",
            "--config",
            "adopt.yml",
            "-v",
            "--no-color",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("adopt.yml")));
        assert_eq!(cli.output_mode(), OutputMode::Verbose);
        assert!(cli.no_color);
        assert!(cli.debug);
    }

    #[test]
    fn quiet_mode() {
        let cli = Cli::try_parse_from(["choco-adopt", "-q"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["choco-adopt", "-v", "-q"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["choco-adopt", "run"]).is_err());
    }
}
