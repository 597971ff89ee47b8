//! Prerequisite checks.
//!
//! Both package managers must answer `--version` before any inventory is
//! read. Elevation is only reported: installs can still prompt for it one
//! package at a time.

use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::shell::{is_elevated, CommandRunner};
use crate::ui::UserInterface;

const WINGET_HINT: &str = "WinGet ships with Windows 11. On Windows 10, install it from https://aka.ms/getwinget";
const CHOCO_HINT: &str = "Install Chocolatey from https://chocolatey.org/install";

/// Verify both CLIs respond, then report elevation status.
///
/// # Errors
///
/// Returns `ToolMissing` for the first CLI that does not answer.
pub fn check_prerequisites(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    ui.show_header("Checking Prerequisites");

    let winget = probe_version(runner, &settings.winget, "WinGet", WINGET_HINT)?;
    ui.success(&format!("WinGet is installed (version: {})", winget));

    let choco = probe_version(runner, &settings.choco, "Chocolatey", CHOCO_HINT)?;
    ui.success(&format!("Chocolatey is installed (version: {})", choco));

    report_elevation(ui, is_elevated(runner));
    Ok(())
}

/// Run `<program> --version` and return the trimmed version text.
pub fn probe_version(
    runner: &dyn CommandRunner,
    program: &str,
    tool: &str,
    hint: &str,
) -> Result<String> {
    let result = runner.run(program, &["--version"]);

    if !result.success {
        tracing::debug!("{} version probe failed: {}", tool, result.stderr.trim());
        return Err(AdoptError::ToolMissing {
            tool: tool.to_string(),
            hint: hint.to_string(),
        });
    }

    Ok(result.stdout.trim().to_string())
}

/// Warn when the process is not elevated.
pub fn report_elevation(ui: &mut dyn UserInterface, elevated: bool) {
    if elevated {
        ui.success("Running with Administrator privileges");
    } else {
        ui.warning("Not running as Administrator");
        ui.show_hint("Registration will require elevation for each package");
        ui.show_hint("Consider running as Administrator for a smoother run");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;

    #[test]
    fn both_tools_present() {
        let runner = MockRunner::new();
        runner.ok("winget --version", "v1.7.10861\r\n");
        runner.ok("choco --version", "2.2.2\n");
        let mut ui = MockUI::new();

        check_prerequisites(&runner, &Settings::default(), &mut ui).unwrap();

        assert!(ui.has_success("WinGet is installed (version: v1.7.10861)"));
        assert!(ui.has_success("Chocolatey is installed (version: 2.2.2)"));
        assert_eq!(ui.headers(), ["Checking Prerequisites"]);
    }

    #[test]
    fn missing_winget_stops_before_choco() {
        let runner = MockRunner::new();
        runner.ok("choco --version", "2.2.2");
        let mut ui = MockUI::new();

        let err = check_prerequisites(&runner, &Settings::default(), &mut ui).unwrap_err();

        match err {
            AdoptError::ToolMissing { tool, hint } => {
                assert_eq!(tool, "WinGet");
                assert!(hint.contains("https://aka.ms/getwinget"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!runner.was_called("choco --version"));
    }

    #[test]
    fn missing_choco_is_tool_missing() {
        let runner = MockRunner::new();
        runner.ok("winget --version", "v1.7");
        runner.fail("choco --version", 9009, "'choco' is not recognized");
        let mut ui = MockUI::new();

        let err = check_prerequisites(&runner, &Settings::default(), &mut ui).unwrap_err();

        assert!(err.to_string().contains("Chocolatey is not available"));
        assert!(err.to_string().contains("https://chocolatey.org/install"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn configured_program_names_are_used() {
        let runner = MockRunner::new();
        runner.ok("C:\\tools\\choco.exe --version", "2.2.2");
        runner.ok("winget --version", "v1.7");
        let settings = Settings {
            choco: "C:\\tools\\choco.exe".to_string(),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        assert!(check_prerequisites(&runner, &settings, &mut ui).is_ok());
    }

    #[test]
    fn not_elevated_is_only_a_warning() {
        let mut ui = MockUI::new();
        report_elevation(&mut ui, false);
        assert!(ui.has_warning("Not running as Administrator"));
        assert!(ui.has_hint("require elevation for each package"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn elevated_is_reported() {
        let mut ui = MockUI::new();
        report_elevation(&mut ui, true);
        assert!(ui.has_success("Administrator privileges"));
        assert!(ui.warnings().is_empty());
    }
}
