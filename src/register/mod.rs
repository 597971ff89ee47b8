//! Presenting matches and registering them with Chocolatey.
//!
//! - [`plan`] - Menu choices and the pure registration decision
//! - [`installer`] - Sequential installs and the summary
//! - [`script`] - Batch script export

pub mod installer;
pub mod plan;
pub mod script;

pub use installer::{
    error_excerpt, install_all, install_package, show_summary, RegistrationOutcome,
    ERROR_EXCERPT_LEN,
};
pub use plan::{prompt_plan, MenuChoice, RegistrationPlan, CONFIRM_PROMPT_KEY, MENU_PROMPT_KEY};
pub use script::{escape_batch, export_script, render_script};

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Settings;
use crate::error::Result;
use crate::matcher::Match;
use crate::shell::CommandRunner;
use crate::ui::{Table, UserInterface};

/// Widest app name shown in the results table.
pub const APP_COLUMN_WIDTH: usize = 40;

/// How the registration stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationReport {
    /// The operator chose to leave.
    Exited,
    /// SELECT mode ended with nothing confirmed.
    NothingSelected,
    /// The batch script was written here.
    Exported(PathBuf),
    /// Installs ran; one outcome per package, in order.
    Installed(Vec<RegistrationOutcome>),
}

impl RegistrationReport {
    /// Whether any install failed.
    pub fn has_failures(&self) -> bool {
        match self {
            Self::Installed(outcomes) => outcomes.iter().any(|o| !o.success),
            _ => false,
        }
    }
}

/// Render the matches as a table.
pub fn results_table(matches: &[Match]) -> Table {
    let mut table = Table::new(&["Installed App", "Chocolatey Package", "Version"])
        .with_max_width(0, APP_COLUMN_WIDTH);
    for m in matches {
        table.add_row(&[
            m.app_name.as_str(),
            m.package_id.as_str(),
            m.package_version.as_str(),
        ]);
    }
    table
}

/// Show the matches found by the repository search.
pub fn show_results(ui: &mut dyn UserInterface, matches: &[Match]) {
    ui.show_header("RESULTS");
    ui.message(&format!(
        "Found {} apps that can be registered with Chocolatey:",
        matches.len()
    ));
    ui.message(&results_table(matches).render());
}

/// Ask what to do with `matches` and carry it out.
///
/// Install failures are reported in the returned outcomes, not as errors.
///
/// # Errors
///
/// Returns `Interrupted` if a prompt is aborted and `ScriptWrite` if the
/// export fails.
pub fn register_matches(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    matches: &[Match],
    pause: &mut dyn FnMut(Duration),
) -> Result<RegistrationReport> {
    ui.show_header("REGISTRATION");

    match prompt_plan(ui, matches)? {
        RegistrationPlan::Exit => {
            ui.message("Exiting without registration.");
            Ok(RegistrationReport::Exited)
        }
        RegistrationPlan::NothingSelected => {
            ui.message("No packages selected. Exiting.");
            Ok(RegistrationReport::NothingSelected)
        }
        RegistrationPlan::Export => {
            let path = export_script(matches, settings, ui)?;
            Ok(RegistrationReport::Exported(path))
        }
        RegistrationPlan::Install(work) => {
            let outcomes = install_all(runner, settings, ui, &work, pause);
            show_summary(ui, settings, &outcomes);
            Ok(RegistrationReport::Installed(outcomes))
        }
    }
}
