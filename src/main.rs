//! choco-adopt CLI entry point.

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use choco_adopt::cli::Cli;
use choco_adopt::config::load_settings;
use choco_adopt::error::{AdoptError, EXIT_INTERRUPTED};
use choco_adopt::pipeline::run_pipeline;
use choco_adopt::shell::{is_ci, SystemRunner};
use choco_adopt::ui::{create_ui, UserInterface};
use clap::Parser;
use console::Term;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("choco_adopt=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("choco_adopt=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Exit with 130 on Ctrl-C outside of prompts.
fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        let term = Term::stderr();
        term.show_cursor().ok();
        term.write_line("\nInterrupted by user. Exiting...").ok();
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    });

    if let Err(e) = result {
        tracing::debug!("Could not install Ctrl-C handler: {}", e);
    }
}

fn report_error(ui: &mut dyn UserInterface, error: &AdoptError) {
    match error {
        AdoptError::Interrupted => ui.warning("Interrupted by user. Exiting..."),
        AdoptError::ToolMissing { tool, hint } => {
            ui.error(&format!("{} is not available!", tool));
            ui.show_hint(hint);
        }
        AdoptError::Other(inner) => ui.error(&format!("Unexpected error: {:?}", inner)),
        e if e.is_unexpected() => ui.error(&format!("Unexpected error: {:?}", e)),
        e => ui.error(&format!("{}. Cannot continue.", e)),
    }
}

fn run(cli: &Cli) -> u8 {
    let mut ui = create_ui(Term::stdout().is_term() && !is_ci(), cli.output_mode());
    ui.show_header("Chocolatey Registration for Apps Not Managed by WinGet");

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(ui.as_mut(), &e);
            return e.exit_code();
        }
    };

    match settings.to_yaml() {
        Ok(yaml) => tracing::debug!("Settings in effect:\n{}", yaml),
        Err(e) => tracing::debug!("Could not render settings: {}", e),
    }

    let runner = SystemRunner::new();
    let mut pause = std::thread::sleep;

    match run_pipeline(&runner, &settings, ui.as_mut(), &mut pause) {
        Ok(outcome) => {
            tracing::debug!("Pipeline finished: {:?}", outcome);
            outcome.exit_code()
        }
        Err(e) => {
            report_error(ui.as_mut(), &e);
            e.exit_code()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("choco-adopt starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    install_interrupt_handler();

    match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(code) => ExitCode::from(code),
        Err(_) => {
            eprintln!("Unexpected internal error. Run with --debug for details.");
            ExitCode::from(1)
        }
    }
}
