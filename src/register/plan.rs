//! Registration decisions.
//!
//! [`RegistrationPlan::decide`] turns a menu choice and per-match answers
//! into the action to take. It never touches the terminal; [`prompt_plan`]
//! gathers the inputs through a [`UserInterface`].

use crate::error::Result;
use crate::matcher::Match;
use crate::ui::{Prompt, PromptOption, UserInterface};

/// Prompt key for the registration menu.
pub const MENU_PROMPT_KEY: &str = "registration_mode";

/// Prompt key for each per-package confirmation in SELECT mode.
pub const CONFIRM_PROMPT_KEY: &str = "register_package";

/// Registration menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Register every match.
    All,
    /// Confirm each match individually.
    Select,
    /// Write a batch script instead of installing.
    Export,
    /// Leave without registering anything.
    Exit,
}

impl MenuChoice {
    /// Every entry in menu order.
    pub const ALL_CHOICES: [MenuChoice; 4] = [Self::All, Self::Select, Self::Export, Self::Exit];

    /// Stable value used in prompt answers and overrides.
    pub fn value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Select => "select",
            Self::Export => "export",
            Self::Exit => "exit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Register all packages automatically",
            Self::Select => "Review and select packages individually",
            Self::Export => "Export to batch file (manual registration)",
            Self::Exit => "Exit without registering",
        }
    }

    /// Parse a prompt answer. Menu numbers 1-4 are accepted too.
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "1" => Some(Self::All),
            "select" | "2" => Some(Self::Select),
            "export" | "3" => Some(Self::Export),
            "exit" | "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// What the registrar should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationPlan {
    /// Stop without side effects.
    Exit,
    /// Write the batch script for every match.
    Export,
    /// SELECT mode with no confirmed packages.
    NothingSelected,
    /// Install these matches, in order.
    Install(Vec<Match>),
}

impl RegistrationPlan {
    /// Compute the plan for a menu choice.
    ///
    /// `confirmations` is only read for [`MenuChoice::Select`] and pairs with
    /// `matches` by position; a missing answer counts as "no".
    pub fn decide(choice: MenuChoice, matches: &[Match], confirmations: &[bool]) -> Self {
        match choice {
            MenuChoice::Exit => Self::Exit,
            MenuChoice::Export => Self::Export,
            MenuChoice::All => Self::Install(matches.to_vec()),
            MenuChoice::Select => {
                let work: Vec<Match> = matches
                    .iter()
                    .zip(confirmations.iter().copied().chain(std::iter::repeat(false)))
                    .filter(|(_, confirmed)| *confirmed)
                    .map(|(m, _)| m.clone())
                    .collect();

                if work.is_empty() {
                    Self::NothingSelected
                } else {
                    Self::Install(work)
                }
            }
        }
    }
}

/// Ask for the menu choice and, in SELECT mode, one answer per match.
///
/// An unrecognised answer is treated as EXIT so a bad override can never
/// trigger installs.
pub fn prompt_plan(ui: &mut dyn UserInterface, matches: &[Match]) -> Result<RegistrationPlan> {
    let options = MenuChoice::ALL_CHOICES
        .iter()
        .map(|c| PromptOption::new(c.label(), c.value()))
        .collect();
    let menu = Prompt::select(
        MENU_PROMPT_KEY,
        "Registration options",
        options,
        Some(MenuChoice::Exit.value()),
    );

    let answer = ui.prompt(&menu)?.as_string();
    let choice = MenuChoice::from_value(&answer).unwrap_or_else(|| {
        tracing::debug!("Unrecognised menu answer '{}', exiting", answer);
        MenuChoice::Exit
    });

    let mut confirmations = Vec::new();
    if choice == MenuChoice::Select {
        ui.message("Select packages to register:");
        let total = matches.len();
        for (i, m) in matches.iter().enumerate() {
            let question = format!("[{}/{}] Register {}?", i + 1, total, m.app_name);
            let confirmed = ui
                .prompt(&Prompt::confirm(CONFIRM_PROMPT_KEY, question, false))?
                .as_bool()
                .unwrap_or(false);
            confirmations.push(confirmed);
        }
    }

    Ok(RegistrationPlan::decide(choice, matches, &confirmations))
}
