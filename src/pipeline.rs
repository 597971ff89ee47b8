//! The end-to-end adoption pipeline.
//!
//! Stages run in order and each one fills its own field of
//! [`PipelineContext`]; later stages only read what earlier ones wrote.
//! A stage failure aborts the run. Finding nothing to adopt is an outcome,
//! not an error.

use std::time::Duration;

use crate::config::Settings;
use crate::error::Result;
use crate::inventory::{
    read_choco_inventory, read_installed_programs, read_winget_inventory, ChocoInventory,
    InstalledProgram, WingetInventory,
};
use crate::matcher::{find_matches, Match};
use crate::prerequisites::check_prerequisites;
use crate::reconcile::{find_unmanaged, UnmanagedApp};
use crate::register::{register_matches, show_results, RegistrationReport};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// Everything the stages have gathered so far.
#[derive(Debug, Default)]
pub struct PipelineContext {
    pub winget: WingetInventory,
    pub programs: Vec<InstalledProgram>,
    pub choco: ChocoInventory,
    pub unmanaged: Vec<UnmanagedApp>,
    pub matches: Vec<Match>,
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every installed program is already managed.
    AllManaged,
    /// Nothing unmanaged has a repository package.
    NoMatches,
    /// Matches were presented and the registrar ran.
    Registered(RegistrationReport),
}

impl PipelineOutcome {
    /// Process exit code: 1 only when an install failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Registered(report) if report.has_failures() => 1,
            _ => 0,
        }
    }
}

/// Read the WinGet inventory into `ctx.winget`.
pub fn winget_stage(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    ctx: &mut PipelineContext,
) -> Result<()> {
    ui.show_header("Step 1/5: Checking WinGet Managed Packages");
    let mut spinner = ui.start_spinner("Querying WinGet...");
    let result = read_winget_inventory(runner, settings);
    spinner.finish_clear();
    ctx.winget = result?;

    if ctx.winget.is_empty() {
        ui.warning("No WinGet packages detected");
        ui.show_hint("This is unusual. Continuing anyway...");
    } else {
        ui.success(&format!("Found {} apps managed by WinGet", ctx.winget.len()));
    }
    Ok(())
}

/// Read the uninstall registry into `ctx.programs`.
pub fn registry_stage(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    ctx: &mut PipelineContext,
) -> Result<()> {
    ui.show_header("Step 2/5: Scanning Installed Programs");
    let mut spinner = ui.start_spinner("Reading uninstall registry...");
    let result = read_installed_programs(runner, settings);
    spinner.finish_clear();
    ctx.programs = result?;

    ui.success(&format!(
        "Found {} installed programs",
        ctx.programs.len()
    ));
    Ok(())
}

/// Read the Chocolatey inventory into `ctx.choco`.
pub fn choco_stage(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    ctx: &mut PipelineContext,
) -> Result<()> {
    ui.show_header("Step 3/5: Checking Chocolatey Packages");
    let mut spinner = ui.start_spinner("Querying Chocolatey...");
    let result = read_choco_inventory(runner, settings);
    spinner.finish_clear();
    ctx.choco = result?;

    ui.success(&format!("Found {} packages in Chocolatey", ctx.choco.len()));
    Ok(())
}

/// Reconcile the inventories into `ctx.unmanaged`.
pub fn reconcile_stage(ui: &mut dyn UserInterface, ctx: &mut PipelineContext) {
    ui.show_header("Step 4/5: Finding Unmanaged Apps");
    ctx.unmanaged = find_unmanaged(&ctx.winget, &ctx.programs, &ctx.choco);
    ui.success(&format!(
        "Found {} apps not managed by WinGet or Chocolatey",
        ctx.unmanaged.len()
    ));
}

/// Search the repository for every unmanaged app into `ctx.matches`.
pub fn match_stage(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    ctx: &mut PipelineContext,
) {
    ui.show_header("Step 5/5: Searching Chocolatey Repository");
    ui.message("This may take a few minutes...");
    ctx.matches = find_matches(runner, settings, &ctx.unmanaged, ui);
}

/// Run every stage and the registrar.
///
/// `pause` is handed to the installer for the delay between installs.
///
/// # Errors
///
/// Returns the first stage error, a script write error, or `Interrupted`.
pub fn run_pipeline(
    runner: &dyn CommandRunner,
    settings: &Settings,
    ui: &mut dyn UserInterface,
    pause: &mut dyn FnMut(Duration),
) -> Result<PipelineOutcome> {
    check_prerequisites(runner, settings, ui)?;

    let mut ctx = PipelineContext::default();
    winget_stage(runner, settings, ui, &mut ctx)?;
    registry_stage(runner, settings, ui, &mut ctx)?;
    choco_stage(runner, settings, ui, &mut ctx)?;

    reconcile_stage(ui, &mut ctx);
    if ctx.unmanaged.is_empty() {
        ui.success("All your apps are already managed!");
        ui.show_hint("No action needed.");
        return Ok(PipelineOutcome::AllManaged);
    }

    match_stage(runner, settings, ui, &mut ctx);
    if ctx.matches.is_empty() {
        ui.warning("No matching Chocolatey packages found.");
        ui.show_hint("Your apps might be too specialized or not available in Chocolatey.");
        return Ok(PipelineOutcome::NoMatches);
    }
    ui.success(&format!(
        "Found {} matching packages in Chocolatey",
        ctx.matches.len()
    ));

    show_results(ui, &ctx.matches);
    let report = register_matches(runner, settings, ui, &ctx.matches, pause)?;

    if report.has_failures() {
        ui.warning("Registration completed with some errors.");
    } else {
        ui.success("Completed successfully!");
    }
    Ok(PipelineOutcome::Registered(report))
}
