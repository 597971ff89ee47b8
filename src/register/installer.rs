//! Sequential package installs.

use std::time::Duration;

use crate::config::Settings;
use crate::matcher::Match;
use crate::shell::{CommandResult, CommandRunner};
use crate::ui::UserInterface;

/// Longest error excerpt kept per failed install.
pub const ERROR_EXCERPT_LEN: usize = 200;

/// Result of one install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub package: Match,
    pub success: bool,
    pub error: Option<String>,
}

impl RegistrationOutcome {
    pub fn succeeded(package: Match) -> Self {
        Self {
            package,
            success: true,
            error: None,
        }
    }

    pub fn failed(package: Match, error: Option<String>) -> Self {
        Self {
            package,
            success: false,
            error,
        }
    }
}

/// First [`ERROR_EXCERPT_LEN`] characters of a failed install's output.
///
/// Chocolatey reports most failures on stdout, so stdout is used when
/// stderr is empty.
pub fn error_excerpt(result: &CommandResult) -> Option<String> {
    let text = match result.stderr.trim() {
        "" => result.stdout.trim(),
        stderr => stderr,
    };

    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(ERROR_EXCERPT_LEN).collect())
    }
}

/// Install one match with the adoption flags.
pub fn install_package(
    runner: &dyn CommandRunner,
    settings: &Settings,
    package: &Match,
) -> (RegistrationOutcome, CommandResult) {
    let result = runner.run(
        &settings.choco,
        &settings.install_command_args(&package.package_id),
    );
    tracing::debug!(
        "Install of {} exited with {:?} after {:?}",
        package.package_id,
        result.exit_code,
        result.duration
    );

    let outcome = if result.success {
        RegistrationOutcome::succeeded(package.clone())
    } else {
        RegistrationOutcome::failed(package.clone(), error_excerpt(&result))
    };
    (outcome, result)
}

/// Install every match in order, pausing between installs.
///
/// `pause` is called with the configured delay after each install except
/// the last. A failure never stops the batch.
pub fn install_all(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    work: &[Match],
    pause: &mut dyn FnMut(Duration),
) -> Vec<RegistrationOutcome> {
    let total = work.len();
    ui.show_header(&format!("Registering {} Package(s)", total));

    let mut outcomes = Vec::with_capacity(total);
    for (i, package) in work.iter().enumerate() {
        ui.message(&format!(
            "[{}/{}] Registering: {}",
            i + 1,
            total,
            package.app_name
        ));
        ui.show_hint(&format!("Chocolatey package: {}", package.package_id));

        let command_line = settings.install_command_line(&package.package_id);
        let mut spinner = ui.start_spinner(&command_line);
        let (outcome, result) = install_package(runner, settings, package);
        spinner.finish_clear();

        if ui.output_mode().shows_command_output() && !result.stdout.trim().is_empty() {
            ui.message(result.stdout.trim_end());
        }

        if outcome.success {
            ui.success("Successfully registered");
        } else {
            ui.error("Registration failed");
            if let Some(error) = &outcome.error {
                ui.show_hint(&format!("Error: {}", error));
            }
        }
        outcomes.push(outcome);

        if i + 1 < total {
            pause(settings.install_delay());
        }
    }

    outcomes
}

/// Print counts, failed packages and the commands to retry them.
///
/// Returns `true` when every install succeeded.
pub fn show_summary(
    ui: &mut dyn UserInterface,
    settings: &Settings,
    outcomes: &[RegistrationOutcome],
) -> bool {
    let failed: Vec<&RegistrationOutcome> = outcomes.iter().filter(|o| !o.success).collect();
    let succeeded = outcomes.len() - failed.len();

    ui.show_header("REGISTRATION SUMMARY");
    ui.summary(&format!("Successfully registered: {}", succeeded));

    if failed.is_empty() {
        ui.summary("Failed: 0");
        return true;
    }

    ui.error(&format!("Failed: {}", failed.len()));
    ui.summary("Failed packages:");
    for outcome in &failed {
        ui.summary(&format!(
            "  - {} ({})",
            outcome.package.app_name, outcome.package.package_id
        ));
    }

    ui.summary("You can try registering these manually with:");
    for outcome in &failed {
        ui.summary(&format!(
            "  {}",
            settings.install_command_line(&outcome.package.package_id)
        ));
    }

    false
}
